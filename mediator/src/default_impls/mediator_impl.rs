use crate::error::{Error, ErrorKind};
use crate::{CancellationToken, Mediator, Request, RequestHandler};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type BoxAny = Box<dyn Any + Send>;

// Identifies a handler by the pair of types it maps.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
struct HandlerKey {
    req_ty: TypeId,
    res_ty: TypeId,
}

impl HandlerKey {
    pub fn of<Req: 'static, Res: 'static>() -> Self {
        HandlerKey {
            req_ty: TypeId::of::<Req>(),
            res_ty: TypeId::of::<Res>(),
        }
    }
}

// A request handler with its types erased so handlers of different requests share one map.
// To provide type safety without unsafe code we box the request and the result.
trait ErasedHandler<S: ?Sized>: Send + Sync {
    fn handle<'a>(
        &'a self,
        req: BoxAny,
        scope: &'a mut S,
        token: CancellationToken,
    ) -> BoxFuture<'a, crate::Result<BoxAny>>;
}

struct RequestHandlerWrapper<Req, Res, H> {
    handler: H,
    _marker: PhantomData<fn(Req) -> Res>,
}

impl<Req, Res, H> RequestHandlerWrapper<Req, Res, H> {
    pub fn new(handler: H) -> Self {
        RequestHandlerWrapper {
            handler,
            _marker: PhantomData,
        }
    }
}

impl<Req, Res, H, S> ErasedHandler<S> for RequestHandlerWrapper<Req, Res, H>
where
    Req: Request<Res> + Send + 'static,
    Res: Send + 'static,
    H: RequestHandler<Req, Res, S>,
    S: ?Sized + Send + 'static,
{
    fn handle<'a>(
        &'a self,
        req: BoxAny,
        scope: &'a mut S,
        token: CancellationToken,
    ) -> BoxFuture<'a, crate::Result<BoxAny>> {
        Box::pin(async move {
            let req = req.downcast::<Req>().map_err(|_| {
                Error::new(
                    ErrorKind::Unknown,
                    format!("expected a `{}` request", type_name::<Req>()),
                )
            })?;

            let res = self.handler.handle(*req, scope, token).await;
            Ok(Box::new(res) as BoxAny)
        })
    }
}

/// A default implementation for the [Mediator] trait.
///
/// The handler registry is fixed once [Builder::build] returns, so clones are cheap
/// and requests never contend on a lock to find their handler.
pub struct DefaultMediator<S: ?Sized> {
    request_handlers: Arc<HashMap<HandlerKey, Arc<dyn ErasedHandler<S>>>>,
}

impl<S: ?Sized> Clone for DefaultMediator<S> {
    fn clone(&self) -> Self {
        DefaultMediator {
            request_handlers: self.request_handlers.clone(),
        }
    }
}

impl<S: ?Sized + Send + 'static> DefaultMediator<S> {
    /// Gets a [DefaultMediator] builder.
    pub fn builder() -> Builder<S> {
        Builder::new()
    }

    /// Returns the number of registered handlers.
    pub fn len(&self) -> usize {
        self.request_handlers.len()
    }

    /// Returns `true` if no handler was registered.
    pub fn is_empty(&self) -> bool {
        self.request_handlers.is_empty()
    }
}

#[async_trait::async_trait]
impl<S> Mediator<S> for DefaultMediator<S>
where
    S: ?Sized + Send + 'static,
{
    async fn send<Req, Res>(
        &self,
        req: Req,
        scope: &mut S,
        token: CancellationToken,
    ) -> crate::Result<Res>
    where
        Res: Send + 'static,
        Req: Request<Res> + Send + 'static,
    {
        if token.is_cancelled() {
            return Err(Error::new(ErrorKind::Cancelled, type_name::<Req>()));
        }

        let handler = match self.request_handlers.get(&HandlerKey::of::<Req, Res>()) {
            Some(handler) => handler.clone(),
            None => return Err(Error::new(ErrorKind::NotFound, type_name::<Req>())),
        };

        let res = handler.handle(Box::new(req), scope, token).await?;

        res.downcast::<Res>().map(|res| *res).map_err(|_| {
            Error::new(
                ErrorKind::Unknown,
                format!("expected a `{}` response", type_name::<Res>()),
            )
        })
    }
}

/// A builder for the [DefaultMediator].
pub struct Builder<S: ?Sized> {
    request_handlers: HashMap<HandlerKey, Arc<dyn ErasedHandler<S>>>,
}

impl<S: ?Sized + Send + 'static> Builder<S> {
    /// Constructs a new `Builder`.
    pub fn new() -> Self {
        Builder {
            request_handlers: HashMap::new(),
        }
    }

    /// Registers a request handler.
    ///
    /// Registering a second handler for the same request and response types replaces the first.
    pub fn add_handler<Req, Res, H>(mut self, handler: H) -> Self
    where
        Req: Request<Res> + Send + 'static,
        Res: Send + 'static,
        H: RequestHandler<Req, Res, S> + 'static,
    {
        let handler: Arc<dyn ErasedHandler<S>> =
            Arc::new(RequestHandlerWrapper::<Req, Res, H>::new(handler));

        self.request_handlers
            .insert(HandlerKey::of::<Req, Res>(), handler);
        self
    }

    /// Builds the `DefaultMediator`.
    pub fn build(self) -> DefaultMediator<S> {
        DefaultMediator {
            request_handlers: Arc::new(self.request_handlers),
        }
    }
}

impl<S: ?Sized + Send + 'static> Default for Builder<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use crate::{
        CancellationToken, DefaultMediator, ErrorKind, Mediator, Request, RequestHandler,
    };
    use std::marker::PhantomData;

    struct WaitAndGetRequest<T>(T);
    impl<T: Send> Request<T> for WaitAndGetRequest<T> {}

    struct WaitAndGetRequestHandler<T>(PhantomData<fn() -> T>);

    #[async_trait::async_trait]
    impl<T: Send + 'static> RequestHandler<WaitAndGetRequest<T>, T, Vec<String>>
        for WaitAndGetRequestHandler<T>
    {
        async fn handle(
            &self,
            req: WaitAndGetRequest<T>,
            scope: &mut Vec<String>,
            _: CancellationToken,
        ) -> T {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            scope.push(std::any::type_name::<T>().to_owned());
            req.0
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn send_test() {
        let mediator = DefaultMediator::<Vec<String>>::builder()
            .add_handler(WaitAndGetRequestHandler::<i32>(PhantomData))
            .add_handler(WaitAndGetRequestHandler::<String>(PhantomData))
            .build();

        let mut scope = Vec::new();

        let res1: i32 = mediator
            .send(WaitAndGetRequest(1), &mut scope, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(res1, 1);

        let res2 = mediator
            .send(
                WaitAndGetRequest("hello".to_owned()),
                &mut scope,
                CancellationToken::new(),
            )
            .await
            .unwrap();
        assert_eq!(res2, "hello".to_owned());

        assert_eq!(scope.len(), 2);
        assert_eq!(mediator.len(), 2);
    }

    #[tokio::test]
    async fn send_without_handler_test() {
        let mediator = DefaultMediator::<Vec<String>>::builder()
            .add_handler(WaitAndGetRequestHandler::<i32>(PhantomData))
            .build();

        let mut scope = Vec::new();
        let res: crate::Result<bool> = mediator
            .send(WaitAndGetRequest(true), &mut scope, CancellationToken::new())
            .await;
        let err = res.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(scope.is_empty());
    }

    #[test]
    fn send_sync_test() {
        fn assert_send_sync<T: Send + Sync>(_: T) {}
        assert_send_sync(DefaultMediator::<Vec<u32>>::builder().build());
    }

    #[tokio::test]
    async fn send_cancelled_test() {
        let mediator = DefaultMediator::<Vec<String>>::builder()
            .add_handler(WaitAndGetRequestHandler::<i32>(PhantomData))
            .build();

        let token = CancellationToken::new();
        token.cancel();

        let mut scope = Vec::new();
        let res: crate::Result<i32> = mediator
            .send(WaitAndGetRequest(1), &mut scope, token)
            .await;
        let err = res.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert!(scope.is_empty());
    }

    #[tokio::test]
    async fn add_handler_replaces_test() {
        struct Ping;
        impl Request<&'static str> for Ping {}

        struct First;
        #[async_trait::async_trait]
        impl RequestHandler<Ping, &'static str, Vec<String>> for First {
            async fn handle(
                &self,
                _: Ping,
                _: &mut Vec<String>,
                _: CancellationToken,
            ) -> &'static str {
                "first"
            }
        }

        struct Second;
        #[async_trait::async_trait]
        impl RequestHandler<Ping, &'static str, Vec<String>> for Second {
            async fn handle(
                &self,
                _: Ping,
                _: &mut Vec<String>,
                _: CancellationToken,
            ) -> &'static str {
                "second"
            }
        }

        let mediator = DefaultMediator::<Vec<String>>::builder()
            .add_handler(First)
            .add_handler(Second)
            .build();

        let res = mediator
            .send(Ping, &mut Vec::new(), CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(res, "second");
        assert_eq!(mediator.len(), 1);
    }

    #[tokio::test]
    async fn send_to_unsized_scope_test() {
        trait Counter: Send {
            fn bump(&mut self) -> u32;
        }

        struct Tally(u32);
        impl Counter for Tally {
            fn bump(&mut self) -> u32 {
                self.0 += 1;
                self.0
            }
        }

        struct Bump;
        impl Request<u32> for Bump {}

        struct BumpHandler;
        #[async_trait::async_trait]
        impl RequestHandler<Bump, u32, dyn Counter> for BumpHandler {
            async fn handle(
                &self,
                _: Bump,
                scope: &mut (dyn Counter + 'static),
                _: CancellationToken,
            ) -> u32 {
                scope.bump()
            }
        }

        let mediator = DefaultMediator::<dyn Counter>::builder()
            .add_handler(BumpHandler)
            .build();

        let mut tally = Tally(0);
        let scope: &mut (dyn Counter + 'static) = &mut tally;
        mediator
            .send(Bump, &mut *scope, CancellationToken::new())
            .await
            .unwrap();
        let res = mediator
            .send(Bump, scope, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(res, 2);
    }
}
