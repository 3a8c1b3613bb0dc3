use std::fmt;

use tracing::{debug, trace};
use wirecall_message::Message;

use crate::channel::Channel;
use crate::descriptor::MethodDescriptor;
use crate::envelope::{CallRequest, CallResponse};
use crate::server::DEFAULT_MAX_MESSAGE_SIZE;
use crate::status::Status;

/// Client-side limits.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Largest response frame accepted, in bytes. Default: 4 MiB.
    pub max_response_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_response_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

/// Lifecycle of one call on the client, as logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientPhase {
    Built,
    Sent,
    AwaitingResponse,
    Completed,
    Failed,
}

impl ClientPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Built => "built",
            Self::Sent => "sent",
            Self::AwaitingResponse => "awaiting_response",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ClientPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issues unary calls over a [`Channel`]. One blocking round trip per call,
/// no retries.
#[derive(Debug)]
pub struct Client<C> {
    channel: C,
    config: ClientConfig,
}

impl<C: Channel> Client<C> {
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            config: ClientConfig::default(),
        }
    }

    /// Override client limits.
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Call `method` with `request` and decode its response.
    pub fn call<Req, Resp>(&self, method: &MethodDescriptor, request: &Req) -> Result<Resp, Status>
    where
        Req: Message,
        Resp: Message,
    {
        self.call_path(method.path, request)
    }

    /// Call by raw path, e.g. `/myapp.hello.v1.Hello/SayHello`.
    pub fn call_path<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, Status>
    where
        Req: Message,
        Resp: Message,
    {
        let result = self.call_inner(path, request);
        match &result {
            Ok(_) => trace!(method = path, phase = %ClientPhase::Completed, "call"),
            Err(status) => debug!(
                method = path,
                code = %status.code(),
                phase = %ClientPhase::Failed,
                "call"
            ),
        }
        result
    }

    fn call_inner<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, Status>
    where
        Req: Message,
        Resp: Message,
    {
        let frame = CallRequest::new(path, request.encode()).encode();
        trace!(method = path, len = frame.len(), phase = %ClientPhase::Built, "call");

        trace!(method = path, phase = %ClientPhase::Sent, "call");
        let reply = self
            .channel
            .round_trip(frame)
            .map_err(|err| Status::unavailable(err.to_string()))?;
        trace!(method = path, len = reply.len(), phase = %ClientPhase::AwaitingResponse, "call");

        if reply.len() > self.config.max_response_size {
            return Err(Status::resource_exhausted(format!(
                "response of {} bytes exceeds limit of {} bytes",
                reply.len(),
                self.config.max_response_size
            )));
        }

        let payload = CallResponse::decode(&reply)
            .map_err(|err| Status::internal(format!("malformed response envelope: {err}")))?
            .into_result()?;

        Resp::decode(&payload)
            .map_err(|err| Status::internal(format!("invalid {}: {err}", Resp::TYPE_NAME)))
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use wirecall_message::{Empty, HelloReq};

    use super::*;
    use crate::error::{ChannelError, Result as ChannelResult};
    use crate::status::Code;

    struct Canned(fn(Bytes) -> ChannelResult<Bytes>);

    impl Channel for Canned {
        fn round_trip(&self, frame: Bytes) -> ChannelResult<Bytes> {
            (self.0)(frame)
        }
    }

    #[test]
    fn channel_failure_is_unavailable_with_verbatim_message() {
        let client = Client::new(Canned(|_| {
            Err(ChannelError::Other("connection reset by peer".into()))
        }));
        let err = client
            .call_path::<_, Empty>("/a.B/C", &HelloReq::new("x"))
            .expect_err("channel is broken");
        assert_eq!(err, Status::unavailable("connection reset by peer"));
    }

    #[test]
    fn request_envelope_carries_path_and_payload() {
        let client = Client::new(Canned(|frame| {
            let request = CallRequest::decode(&frame).expect("client sends an envelope");
            assert_eq!(request.method, "/a.B/C");
            assert_eq!(HelloReq::decode(&request.payload).expect("payload").name, "bob");
            Ok(CallResponse::ok(Bytes::new()).encode())
        }));
        let _: Empty = client
            .call_path("/a.B/C", &HelloReq::new("bob"))
            .expect("canned OK");
    }

    #[test]
    fn garbage_reply_is_internal() {
        let client = Client::new(Canned(|_| Ok(Bytes::from_static(&[0x0A, 0x7F]))));
        let err = client
            .call_path::<_, Empty>("/a.B/C", &HelloReq::default())
            .expect_err("truncated envelope");
        assert_eq!(err.code(), Code::Internal);
    }

    #[test]
    fn oversize_reply_is_resource_exhausted() {
        let client = Client::new(Canned(|_| Ok(Bytes::from(vec![0u8; 64]))))
            .with_config(ClientConfig {
                max_response_size: 16,
            });
        let err = client
            .call_path::<_, Empty>("/a.B/C", &HelloReq::default())
            .expect_err("reply too large");
        assert_eq!(err.code(), Code::ResourceExhausted);
    }

    #[test]
    fn non_ok_code_is_returned_as_status() {
        let client = Client::new(Canned(|_| {
            Ok(CallResponse::from_status(&Status::invalid_argument("name too long")).encode())
        }));
        let err = client
            .call_path::<_, Empty>("/a.B/C", &HelloReq::default())
            .expect_err("server refused");
        assert_eq!(err, Status::invalid_argument("name too long"));
    }

    #[test]
    fn reply_code_beyond_u32_is_not_success() {
        let client = Client::new(Canned(|_| {
            Ok(Bytes::from_static(&[
                0x08, 0x80, 0x80, 0x80, 0x80, 0x10, 0x12, 0x04, b'b', b'o', b'o', b'm',
            ]))
        }));
        let err = client
            .call_path::<_, Empty>("/a.B/C", &HelloReq::default())
            .expect_err("code 1 << 32 is not OK");
        assert_eq!(err.code(), Code::Unknown);
        assert_eq!(err.message(), "boom");
    }
}
