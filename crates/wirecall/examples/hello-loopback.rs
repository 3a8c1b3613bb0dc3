//! Serve `Hello` in-process and call it twice: once implemented, once not.
//!
//! Run: `cargo run -p wirecall --example hello-loopback`

use std::sync::Arc;

use wirecall::message::{Empty, HelloReq};
use wirecall::rpc::hello::{
    register_hello_service, HelloClient, HelloService, UnimplementedHelloServer,
};
use wirecall::rpc::{CallContext, LoopbackChannel, Server, Status};

struct Greeter;

impl HelloService for Greeter {
    fn say_hello(&self, _ctx: &CallContext, request: HelloReq) -> Result<Empty, Status> {
        println!("server: hello, {}", request.name);
        Ok(Empty::default())
    }
}

fn main() {
    let server = register_hello_service(Server::builder(), Arc::new(Greeter)).build();
    let client = HelloClient::new(LoopbackChannel::new(Arc::new(server)));
    match client.say_hello(&HelloReq::new("loopback")) {
        Ok(_) => println!("client: ok"),
        Err(status) => println!("client: {status}"),
    }

    let server = register_hello_service(Server::builder(), Arc::new(UnimplementedHelloServer)).build();
    let client = HelloClient::new(LoopbackChannel::new(Arc::new(server)));
    match client.say_hello(&HelloReq::new("loopback")) {
        Ok(_) => println!("client: ok"),
        Err(status) => println!("client: {status}"),
    }
}
