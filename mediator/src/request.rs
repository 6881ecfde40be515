use crate::CancellationToken;

/// Represents a request to the mediator.
pub trait Request<Res> {}

/// Handles a request to the mediator.
///
/// `S` is the scope the caller owns for the duration of one request. The
/// mediator lends it to the handler mutably and never keeps it.
#[async_trait::async_trait]
pub trait RequestHandler<Req, Res, S>: Send + Sync
where
    Req: Request<Res> + Send,
    S: ?Sized + Send,
{
    /// Handle a request and returns the response.
    async fn handle(&self, req: Req, scope: &mut S, token: CancellationToken) -> Res;
}
