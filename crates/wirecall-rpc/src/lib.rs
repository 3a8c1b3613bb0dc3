//! Unary remote calls over an opaque [`Channel`].
//!
//! A client encodes the request, wraps it in a [`CallRequest`] naming the
//! method path and makes one round trip. The server looks the path up in an
//! immutable registry, decodes the payload, runs the interceptor chain and
//! the handler, and answers with a [`CallResponse`] carrying either the
//! encoded response or a [`Status`].

pub mod channel;
pub mod client;
pub mod context;
pub mod descriptor;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod hello;
pub mod interceptor;
pub mod server;
pub mod status;

pub use channel::{Channel, LoopbackChannel};
pub use client::{Client, ClientConfig, ClientPhase};
pub use context::CallContext;
pub use descriptor::{CallKind, MethodDescriptor, ServiceDescriptor};
pub use envelope::{CallRequest, CallResponse};
pub use error::{ChannelError, Result};
pub use handler::{handler_fn, unimplemented_handler, HandlerFn, UnaryHandler, Unimplemented};
pub use interceptor::{
    interceptor_fn, AnyMessage, BoxMessage, Interceptor, InterceptorFn, LoggingInterceptor, Next,
};
pub use server::{Server, ServerBuilder, ServerConfig, ServerPhase, DEFAULT_MAX_MESSAGE_SIZE};
pub use status::{Code, Status};
