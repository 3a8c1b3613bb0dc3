//! Interceptor chain wrapped around every handler invocation.
//!
//! Interceptors run in registration order: the first one registered is
//! outermost and sees the request first and the response last. Each one
//! decides whether to continue with [`Next::run`] or answer on its own.

use std::any::Any;
use std::fmt;
use std::time::Instant;

use bytes::Bytes;
use tracing::{debug, info, warn};
use wirecall_message::Message;

use crate::context::CallContext;
use crate::handler::ErasedHandler;
use crate::status::Status;

/// A decoded message of any type, as seen by interceptors.
pub trait AnyMessage: Any + Send + fmt::Debug {
    fn message_type(&self) -> &'static str;

    fn message_len(&self) -> usize;

    fn encode_message(&self) -> Bytes;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<M: Message + Send + 'static> AnyMessage for M {
    fn message_type(&self) -> &'static str {
        M::TYPE_NAME
    }

    fn message_len(&self) -> usize {
        Message::encoded_len(self)
    }

    fn encode_message(&self) -> Bytes {
        Message::encode(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

impl dyn AnyMessage {
    pub fn downcast_ref<M: Message + 'static>(&self) -> Option<&M> {
        self.as_any().downcast_ref::<M>()
    }
}

pub type BoxMessage = Box<dyn AnyMessage>;

/// Continuation handed to an interceptor: the rest of the chain plus the
/// handler at its end.
pub struct Next<'a> {
    rest: &'a [Box<dyn Interceptor>],
    handler: &'a dyn ErasedHandler,
}

impl<'a> Next<'a> {
    pub(crate) fn new(chain: &'a [Box<dyn Interceptor>], handler: &'a dyn ErasedHandler) -> Self {
        Self {
            rest: chain,
            handler,
        }
    }

    /// Invoke the remaining interceptors and then the handler.
    pub fn run(self, ctx: &CallContext, request: BoxMessage) -> Result<BoxMessage, Status> {
        match self.rest.split_first() {
            Some((first, rest)) => first.intercept(
                ctx,
                request,
                Next {
                    rest,
                    handler: self.handler,
                },
            ),
            None => self.handler.invoke(ctx, request),
        }
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("remaining", &self.rest.len())
            .finish_non_exhaustive()
    }
}

/// Cross-cutting hook around handler invocation.
pub trait Interceptor: Send + Sync + 'static {
    fn intercept(
        &self,
        ctx: &CallContext,
        request: BoxMessage,
        next: Next<'_>,
    ) -> Result<BoxMessage, Status>;
}

/// Interceptor backed by a closure. Built with [`interceptor_fn`].
pub struct InterceptorFn<F>(F);

pub fn interceptor_fn<F>(f: F) -> InterceptorFn<F>
where
    F: Fn(&CallContext, BoxMessage, Next<'_>) -> Result<BoxMessage, Status>
        + Send
        + Sync
        + 'static,
{
    InterceptorFn(f)
}

impl<F> Interceptor for InterceptorFn<F>
where
    F: Fn(&CallContext, BoxMessage, Next<'_>) -> Result<BoxMessage, Status>
        + Send
        + Sync
        + 'static,
{
    fn intercept(
        &self,
        ctx: &CallContext,
        request: BoxMessage,
        next: Next<'_>,
    ) -> Result<BoxMessage, Status> {
        (self.0)(ctx, request, next)
    }
}

/// Logs start, completion and failure of every call with its latency.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingInterceptor;

impl Interceptor for LoggingInterceptor {
    fn intercept(
        &self,
        ctx: &CallContext,
        request: BoxMessage,
        next: Next<'_>,
    ) -> Result<BoxMessage, Status> {
        let method = ctx.method().path;
        let started = Instant::now();
        debug!(
            method,
            request_type = request.message_type(),
            request_len = request.message_len(),
            "call started"
        );

        let result = next.run(ctx, request);
        let elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

        match &result {
            Ok(response) => info!(
                method,
                elapsed_us,
                response_len = response.message_len(),
                "call completed"
            ),
            Err(status) => warn!(
                method,
                elapsed_us,
                code = %status.code(),
                detail = status.message(),
                "call failed"
            ),
        }
        result
    }
}
