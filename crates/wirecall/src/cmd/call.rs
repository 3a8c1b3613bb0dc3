use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use wirecall_message::{Empty, HelloReq};
use wirecall_rpc::hello::{
    register_hello_service, HelloClient, HelloService, UnimplementedHelloServer, SAY_HELLO,
};
use wirecall_rpc::{
    CallContext, Code, LoggingInterceptor, LoopbackChannel, Server, ServerBuilder, ServerConfig,
    Status,
};

use crate::cmd::CallArgs;
use crate::exit::{status_error, CliResult, SUCCESS};
use crate::output::{print_json, print_table, OutputFormat};

/// Greets by logging; the response itself is empty.
struct Greeter;

impl HelloService for Greeter {
    fn say_hello(&self, ctx: &CallContext, request: HelloReq) -> Result<Empty, Status> {
        if request.name.is_empty() {
            return Err(Status::invalid_argument("name must not be empty"));
        }
        tracing::info!(method = ctx.method().path, name = %request.name, "hello");
        Ok(Empty::default())
    }
}

#[derive(Serialize)]
struct CallOutput {
    method: &'static str,
    code: &'static str,
    code_value: u32,
    message: String,
    elapsed_us: u64,
}

pub fn run(args: CallArgs, format: OutputFormat) -> CliResult<i32> {
    let mut config = ServerConfig::default();
    if let Some(limit) = args.max_request_size {
        config.max_request_size = limit;
    }
    let builder = Server::builder()
        .with_config(config)
        .intercept(LoggingInterceptor);
    let server = build_server(builder, args.unimplemented);

    let client = HelloClient::new(LoopbackChannel::new(Arc::new(server)));
    let started = Instant::now();
    let result = client.say_hello(&HelloReq::new(args.name));
    let elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    let (code, message) = match &result {
        Ok(_) => (Code::Ok, String::new()),
        Err(status) => (status.code(), status.message().to_string()),
    };

    let out = CallOutput {
        method: SAY_HELLO.path,
        code: code.as_str(),
        code_value: code.as_u32(),
        message,
        elapsed_us,
    };
    print_call(&out, format);

    match result {
        Ok(_) => Ok(SUCCESS),
        Err(status) => Err(status_error("call failed", status)),
    }
}

fn build_server(builder: ServerBuilder, unimplemented: bool) -> Server {
    if unimplemented {
        register_hello_service(builder, Arc::new(UnimplementedHelloServer)).build()
    } else {
        register_hello_service(builder, Arc::new(Greeter)).build()
    }
}

fn print_call(out: &CallOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => print_table(
            &["METHOD", "CODE", "MESSAGE", "ELAPSED"],
            vec![vec![
                out.method.to_string(),
                format!("{} ({})", out.code, out.code_value),
                out.message.clone(),
                format!("{}us", out.elapsed_us),
            ]],
        ),
        OutputFormat::Pretty => {
            println!("Call:");
            println!("  Method:  {}", out.method);
            println!("  Status:  {} ({})", out.code, out.code_value);
            if !out.message.is_empty() {
                println!("  Message: {}", out.message);
            }
            println!("  Elapsed: {}us", out.elapsed_us);
        }
        OutputFormat::Raw => println!("{}", out.code),
    }
}

#[cfg(test)]
mod tests {
    use wirecall_message::Message;

    use super::*;

    #[test]
    fn greeter_accepts_names() {
        let server = build_server(Server::builder(), false);
        assert!(server
            .dispatch(SAY_HELLO.path, &HelloReq::new("ada").encode())
            .is_ok());
    }

    #[test]
    fn greeter_rejects_empty_name() {
        let server = build_server(Server::builder(), false);
        let err = server
            .dispatch(SAY_HELLO.path, &[])
            .expect_err("empty name");
        assert_eq!(err.code(), Code::InvalidArgument);
    }

    #[test]
    fn unimplemented_server_answers_unimplemented() {
        let server = build_server(Server::builder(), true);
        let err = server
            .dispatch(SAY_HELLO.path, &HelloReq::new("ada").encode())
            .expect_err("unimplemented");
        assert_eq!(err.message(), "method SayHello not implemented");
    }
}
