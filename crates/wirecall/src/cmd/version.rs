use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("wirecall {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: wirecall");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "build_target: {}",
        option_env!("WIRECALL_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "features: rpc={}, cli=true",
        cfg!(feature = "rpc")
    );
    println!("wire_format: protobuf binary (varint, fixed32, fixed64, length-delimited, group)");
    println!(
        "max_message_size: {}",
        wirecall_rpc::DEFAULT_MAX_MESSAGE_SIZE
    );

    Ok(SUCCESS)
}
