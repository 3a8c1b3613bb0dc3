use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use tracing::{debug, trace, warn};
use wirecall_message::Message;

use crate::context::CallContext;
use crate::descriptor::MethodDescriptor;
use crate::envelope::{CallRequest, CallResponse};
use crate::handler::{Erased, ErasedHandler, UnaryHandler};
use crate::interceptor::{Interceptor, Next};
use crate::status::Status;

/// Default cap on a request or response payload: 4 MiB.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 4 * 1024 * 1024;

/// Server-side limits.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Largest request payload accepted, in bytes. Default: 4 MiB.
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_request_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

/// Lifecycle of one call on the server, as logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerPhase {
    Received,
    Decoded,
    Handling,
    Responded,
    Failed,
}

impl ServerPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Decoded => "decoded",
            Self::Handling => "handling",
            Self::Responded => "responded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ServerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct Route {
    method: &'static MethodDescriptor,
    handler: Box<dyn ErasedHandler>,
}

/// Collects handlers and interceptors; [`ServerBuilder::build`] freezes them.
pub struct ServerBuilder {
    routes: HashMap<&'static str, Route>,
    interceptors: Vec<Box<dyn Interceptor>>,
    config: ServerConfig,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            interceptors: Vec::new(),
            config: ServerConfig::default(),
        }
    }

    /// Override server limits.
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Route `method` to `handler`. Registering a path twice keeps the
    /// later handler.
    pub fn add_method<H: UnaryHandler>(
        mut self,
        method: &'static MethodDescriptor,
        handler: H,
    ) -> Self {
        let route = Route {
            method,
            handler: Box::new(Erased(handler)),
        };
        if self.routes.insert(method.path, route).is_some() {
            warn!(method = method.path, "handler replaced");
        }
        self
    }

    /// Append an interceptor. The first one added is outermost.
    pub fn intercept<I: Interceptor>(mut self, interceptor: I) -> Self {
        self.interceptors.push(Box::new(interceptor));
        self
    }

    pub fn build(self) -> Server {
        debug!(
            methods = self.routes.len(),
            interceptors = self.interceptors.len(),
            max_request_size = self.config.max_request_size,
            "server built"
        );
        Server {
            routes: self.routes,
            interceptors: self.interceptors,
            config: self.config,
        }
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable method registry. Safe to share across threads behind an `Arc`.
pub struct Server {
    routes: HashMap<&'static str, Route>,
    interceptors: Vec<Box<dyn Interceptor>>,
    config: ServerConfig,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn has_method(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    /// Registered methods, sorted by path.
    pub fn methods(&self) -> Vec<&'static MethodDescriptor> {
        let mut methods: Vec<_> = self.routes.values().map(|route| route.method).collect();
        methods.sort_by_key(|method| method.path);
        methods
    }

    /// Run one call: look up `method`, decode `raw`, pass it through the
    /// interceptor chain to the handler and encode the response.
    pub fn dispatch(&self, method: &str, raw: &[u8]) -> Result<Bytes, Status> {
        trace!(method, len = raw.len(), phase = %ServerPhase::Received, "call");

        let result = self.dispatch_inner(method, raw);
        match &result {
            Ok(response) => {
                trace!(method, len = response.len(), phase = %ServerPhase::Responded, "call")
            }
            Err(status) => debug!(
                method,
                code = %status.code(),
                phase = %ServerPhase::Failed,
                "call"
            ),
        }
        result
    }

    fn dispatch_inner(&self, method: &str, raw: &[u8]) -> Result<Bytes, Status> {
        let Some(route) = self.routes.get(method) else {
            return Err(Status::unimplemented(format!("unknown method {method}")));
        };

        if raw.len() > self.config.max_request_size {
            return Err(Status::resource_exhausted(format!(
                "request of {} bytes exceeds limit of {} bytes",
                raw.len(),
                self.config.max_request_size
            )));
        }

        let request = route.handler.decode(raw).map_err(|err| {
            Status::invalid_argument(format!(
                "invalid {}: {err}",
                route.method.request_type
            ))
        })?;
        trace!(method, phase = %ServerPhase::Decoded, "call");

        let ctx = CallContext::new(route.method);
        trace!(method, phase = %ServerPhase::Handling, "call");
        let response = Next::new(&self.interceptors, route.handler.as_ref()).run(&ctx, request)?;
        Ok(response.encode_message())
    }

    /// Serve one framed call: decode a [`CallRequest`], dispatch it and
    /// return the encoded [`CallResponse`]. Never fails; errors travel in
    /// the response envelope.
    pub fn handle_frame(&self, frame: &[u8]) -> Bytes {
        let result = match CallRequest::decode(frame) {
            Ok(request) => self.dispatch(&request.method, &request.payload),
            Err(err) => {
                debug!(error = %err, "malformed call envelope");
                Err(Status::invalid_argument(format!(
                    "malformed call envelope: {err}"
                )))
            }
        };
        CallResponse::from_result(result).encode()
    }
}

impl fmt::Debug for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server")
            .field("methods", &self.methods())
            .field("interceptors", &self.interceptors.len())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use wirecall_message::{Empty, HelloReq};

    use super::*;
    use crate::descriptor::CallKind;
    use crate::handler::{handler_fn, unimplemented_handler};
    use crate::status::Code;

    const ECHO: MethodDescriptor = MethodDescriptor {
        service: "test.Echo",
        name: "Echo",
        path: "/test.Echo/Echo",
        request_type: HelloReq::TYPE_NAME,
        response_type: HelloReq::TYPE_NAME,
        kind: CallKind::Unary,
    };

    const SILENT: MethodDescriptor = MethodDescriptor {
        service: "test.Echo",
        name: "Silent",
        path: "/test.Echo/Silent",
        request_type: HelloReq::TYPE_NAME,
        response_type: Empty::TYPE_NAME,
        kind: CallKind::Unary,
    };

    fn echo_server() -> Server {
        Server::builder()
            .add_method(&ECHO, handler_fn(|_: &CallContext, req: HelloReq| Ok(req)))
            .add_method(&SILENT, unimplemented_handler::<HelloReq, Empty>())
            .build()
    }

    #[test]
    fn dispatch_echoes_payload() {
        let server = echo_server();
        let raw = HelloReq::new("bob").encode();
        let response = server.dispatch(ECHO.path, &raw).expect("echo should succeed");
        assert_eq!(response, raw);
    }

    #[test]
    fn unknown_method_is_unimplemented() {
        let err = echo_server()
            .dispatch("/test.Echo/Missing", &[])
            .expect_err("no such method");
        assert_eq!(err.code(), Code::Unimplemented);
        assert!(err.message().contains("/test.Echo/Missing"));
    }

    #[test]
    fn bad_request_is_invalid_argument() {
        let err = echo_server()
            .dispatch(ECHO.path, &[0x0A, 0x09, b'x'])
            .expect_err("truncated request");
        assert_eq!(err.code(), Code::InvalidArgument);
        assert!(err.message().contains("myapp.hello.v1.HelloReq"));
    }

    #[test]
    fn oversize_request_is_resource_exhausted() {
        let server = Server::builder()
            .with_config(ServerConfig {
                max_request_size: 4,
            })
            .add_method(&ECHO, handler_fn(|_: &CallContext, req: HelloReq| Ok(req)))
            .build();
        let raw = HelloReq::new("four").encode();
        let err = server.dispatch(ECHO.path, &raw).expect_err("too large");
        assert_eq!(err.code(), Code::ResourceExhausted);

        let fits = HelloReq::new("ab").encode();
        assert!(server.dispatch(ECHO.path, &fits).is_ok());
    }

    #[test]
    fn handle_frame_wraps_status() {
        let server = echo_server();
        let frame = CallRequest::new(SILENT.path, Bytes::new()).encode();
        let response = CallResponse::decode(&server.handle_frame(&frame))
            .expect("response envelope should decode");
        let status = response.into_result().expect_err("silent is unimplemented");
        assert_eq!(status, Status::unimplemented("method Silent not implemented"));
    }

    #[test]
    fn handle_frame_rejects_garbage_envelope() {
        let response = CallResponse::decode(&echo_server().handle_frame(&[0xFF]))
            .expect("response envelope should decode");
        assert_eq!(Code::from_u32(response.code), Code::InvalidArgument);
    }

    #[test]
    fn later_registration_replaces_handler() {
        let server = Server::builder()
            .add_method(&ECHO, unimplemented_handler::<HelloReq, HelloReq>())
            .add_method(&ECHO, handler_fn(|_: &CallContext, req: HelloReq| Ok(req)))
            .build();
        assert_eq!(server.methods().len(), 1);
        assert!(server.dispatch(ECHO.path, &[]).is_ok());
    }

    #[test]
    fn methods_are_sorted_by_path() {
        let paths: Vec<_> = echo_server().methods().iter().map(|m| m.path).collect();
        assert_eq!(paths, vec!["/test.Echo/Echo", "/test.Echo/Silent"]);
    }

    #[test]
    fn server_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Server>();
    }
}
