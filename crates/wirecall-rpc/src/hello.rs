//! Service bindings for `myapp.hello.v1.Hello`.

use std::sync::Arc;

use wirecall_message::{Empty, HelloReq, Message};

use crate::channel::Channel;
use crate::client::Client;
use crate::context::CallContext;
use crate::descriptor::{CallKind, MethodDescriptor, ServiceDescriptor};
use crate::handler::UnaryHandler;
use crate::server::ServerBuilder;
use crate::status::Status;

pub const SERVICE_NAME: &str = "myapp.hello.v1.Hello";

pub const SAY_HELLO: MethodDescriptor = MethodDescriptor {
    service: SERVICE_NAME,
    name: "SayHello",
    path: "/myapp.hello.v1.Hello/SayHello",
    request_type: HelloReq::TYPE_NAME,
    response_type: Empty::TYPE_NAME,
    kind: CallKind::Unary,
};

pub const HELLO_SERVICE: ServiceDescriptor = ServiceDescriptor {
    name: SERVICE_NAME,
    methods: &[SAY_HELLO],
};

/// Server side of `Hello`. Methods left unimplemented answer
/// `Unimplemented`.
pub trait HelloService: Send + Sync + 'static {
    fn say_hello(&self, _ctx: &CallContext, _request: HelloReq) -> Result<Empty, Status> {
        Err(Status::unimplemented_method(&SAY_HELLO))
    }
}

/// Implements nothing; every method reports `Unimplemented`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnimplementedHelloServer;

impl HelloService for UnimplementedHelloServer {}

struct SayHelloHandler<S>(Arc<S>);

impl<S: HelloService> UnaryHandler for SayHelloHandler<S> {
    type Request = HelloReq;
    type Response = Empty;

    fn call(&self, ctx: &CallContext, request: HelloReq) -> Result<Empty, Status> {
        self.0.say_hello(ctx, request)
    }
}

/// Route every `Hello` method to `service`.
pub fn register_hello_service<S: HelloService>(
    builder: ServerBuilder,
    service: Arc<S>,
) -> ServerBuilder {
    builder.add_method(&SAY_HELLO, SayHelloHandler(service))
}

/// Typed client for `Hello`.
#[derive(Debug)]
pub struct HelloClient<C> {
    inner: Client<C>,
}

impl<C: Channel> HelloClient<C> {
    pub fn new(channel: C) -> Self {
        Self {
            inner: Client::new(channel),
        }
    }

    pub fn from_client(inner: Client<C>) -> Self {
        Self { inner }
    }

    pub fn say_hello(&self, request: &HelloReq) -> Result<Empty, Status> {
        self.inner.call(&SAY_HELLO, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_path_is_service_and_method() {
        assert_eq!(
            SAY_HELLO.path,
            format!("/{}/{}", SAY_HELLO.service, SAY_HELLO.name)
        );
        assert_eq!(HELLO_SERVICE.method("SayHello"), Some(&SAY_HELLO));
        assert_eq!(HELLO_SERVICE.method("SayGoodbye"), None);
    }

    #[test]
    fn default_say_hello_is_unimplemented() {
        let err = UnimplementedHelloServer
            .say_hello(&CallContext::new(&SAY_HELLO), HelloReq::new("bob"))
            .expect_err("nothing implemented");
        assert_eq!(err, Status::unimplemented("method SayHello not implemented"));
    }
}
