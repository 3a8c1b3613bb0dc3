use std::fmt;
use std::marker::PhantomData;

use wirecall_message::{DecodeError, Message};

use crate::context::CallContext;
use crate::interceptor::BoxMessage;
use crate::status::Status;

/// Server-side implementation of one unary method.
pub trait UnaryHandler: Send + Sync + 'static {
    type Request: Message + Send + 'static;
    type Response: Message + Send + 'static;

    fn call(&self, ctx: &CallContext, request: Self::Request) -> Result<Self::Response, Status>;
}

/// Handler backed by a closure. Built with [`handler_fn`].
pub struct HandlerFn<Req, Resp, F> {
    f: F,
    _marker: PhantomData<fn(Req) -> Resp>,
}

/// Wrap a closure as a [`UnaryHandler`].
pub fn handler_fn<Req, Resp, F>(f: F) -> HandlerFn<Req, Resp, F>
where
    Req: Message + Send + 'static,
    Resp: Message + Send + 'static,
    F: Fn(&CallContext, Req) -> Result<Resp, Status> + Send + Sync + 'static,
{
    HandlerFn {
        f,
        _marker: PhantomData,
    }
}

impl<Req, Resp, F> UnaryHandler for HandlerFn<Req, Resp, F>
where
    Req: Message + Send + 'static,
    Resp: Message + Send + 'static,
    F: Fn(&CallContext, Req) -> Result<Resp, Status> + Send + Sync + 'static,
{
    type Request = Req;
    type Response = Resp;

    fn call(&self, ctx: &CallContext, request: Req) -> Result<Resp, Status> {
        (self.f)(ctx, request)
    }
}

impl<Req, Resp, F> fmt::Debug for HandlerFn<Req, Resp, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}

/// Handler answering every call with `Unimplemented`, naming the method.
pub struct Unimplemented<Req, Resp> {
    _marker: PhantomData<fn(Req) -> Resp>,
}

pub fn unimplemented_handler<Req, Resp>() -> Unimplemented<Req, Resp>
where
    Req: Message + Send + 'static,
    Resp: Message + Send + 'static,
{
    Unimplemented {
        _marker: PhantomData,
    }
}

impl<Req, Resp> UnaryHandler for Unimplemented<Req, Resp>
where
    Req: Message + Send + 'static,
    Resp: Message + Send + 'static,
{
    type Request = Req;
    type Response = Resp;

    fn call(&self, ctx: &CallContext, _request: Req) -> Result<Resp, Status> {
        Err(Status::unimplemented_method(ctx.method()))
    }
}

impl<Req, Resp> fmt::Debug for Unimplemented<Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unimplemented")
    }
}

/// Type-erased view of a [`UnaryHandler`] stored in the server's route table.
pub(crate) trait ErasedHandler: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<BoxMessage, DecodeError>;

    fn invoke(&self, ctx: &CallContext, request: BoxMessage) -> Result<BoxMessage, Status>;
}

pub(crate) struct Erased<H>(pub(crate) H);

impl<H: UnaryHandler> ErasedHandler for Erased<H> {
    fn decode(&self, bytes: &[u8]) -> Result<BoxMessage, DecodeError> {
        let request = H::Request::decode(bytes)?;
        Ok(Box::new(request))
    }

    fn invoke(&self, ctx: &CallContext, request: BoxMessage) -> Result<BoxMessage, Status> {
        let request = match request.into_any().downcast::<H::Request>() {
            Ok(request) => *request,
            Err(_) => {
                tracing::error!(
                    method = ctx.method().path,
                    expected = H::Request::TYPE_NAME,
                    "interceptor replaced the request with a different message type"
                );
                return Err(Status::internal("request type mismatch"));
            }
        };
        let response = self.0.call(ctx, request)?;
        Ok(Box::new(response))
    }
}

#[cfg(test)]
mod tests {
    use wirecall_message::{Empty, HelloReq};

    use super::*;
    use crate::descriptor::{CallKind, MethodDescriptor};
    use crate::status::Code;

    const PING: MethodDescriptor = MethodDescriptor {
        service: "test.Pinger",
        name: "Ping",
        path: "/test.Pinger/Ping",
        request_type: HelloReq::TYPE_NAME,
        response_type: Empty::TYPE_NAME,
        kind: CallKind::Unary,
    };

    #[test]
    fn closure_handler_is_called() {
        let handler = handler_fn(|ctx: &CallContext, req: HelloReq| {
            assert_eq!(ctx.method().name, "Ping");
            assert_eq!(req.name, "bob");
            Ok(Empty::default())
        });
        let ctx = CallContext::new(&PING);
        assert!(handler.call(&ctx, HelloReq::new("bob")).is_ok());
    }

    #[test]
    fn unimplemented_names_the_method() {
        let handler = unimplemented_handler::<HelloReq, Empty>();
        let err = handler
            .call(&CallContext::new(&PING), HelloReq::default())
            .expect_err("handler should refuse");
        assert_eq!(err.code(), Code::Unimplemented);
        assert_eq!(err.message(), "method Ping not implemented");
    }

    #[test]
    fn erased_rejects_foreign_request_type() {
        let erased = Erased(unimplemented_handler::<HelloReq, Empty>());
        let err = erased
            .invoke(&CallContext::new(&PING), Box::new(Empty::default()))
            .expect_err("downcast should fail");
        assert_eq!(err.code(), Code::Internal);
    }

    #[test]
    fn erased_decode_reports_codec_errors() {
        let erased = Erased(unimplemented_handler::<HelloReq, Empty>());
        let err = erased.decode(&[0x0A, 0x05, b'a']).expect_err("truncated");
        assert_eq!(err, DecodeError::UnexpectedEndOfInput);
    }
}
