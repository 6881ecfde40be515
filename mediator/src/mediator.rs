use crate::request::Request;
use crate::CancellationToken;

/// A mediator is a central hub for communication between components.
#[async_trait::async_trait]
pub trait Mediator<S: ?Sized + Send> {
    /// Sends a request to the handler registered for its type.
    async fn send<Req, Res>(
        &self,
        req: Req,
        scope: &mut S,
        token: CancellationToken,
    ) -> crate::Result<Res>
    where
        Res: Send + 'static,
        Req: Request<Res> + Send + 'static;
}
