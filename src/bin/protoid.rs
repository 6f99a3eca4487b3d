use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::{self, Read};
use std::path::PathBuf;

use protoid::{builtin_context, identify, Direction, IpProto, PerThreadState};

#[derive(Parser)]
#[command(name = "protoid")]
#[command(
    about = "Application-layer protocol detection for reassembled flow buffers",
    long_about = "protoid - identify the application protocol carried by a flow from its \
    first observed bytes, independent of the port it was seen on.\n\n\
    Examples:\n\
      protoid identify --direction to_server --ip-proto tcp input.bin\n\
      echo -n 'GET / HTTP/1.1\\r\\n' | protoid identify --direction to_server\n\
      protoid patterns"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Identify the protocol in a buffer read from a file or stdin
    Identify {
        /// File to read the buffer from, or omit to read stdin
        input: Option<PathBuf>,

        /// Direction the buffer was observed in
        #[arg(long, value_enum, default_value = "to-server")]
        direction: DirectionArg,

        /// Transport protocol the buffer was carried over
        #[arg(long, value_enum, default_value = "tcp")]
        ip_proto: IpProtoArg,

        /// Emit the result as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// List the built-in signature table
    Patterns {
        /// Emit the table as JSON instead of a text table
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum DirectionArg {
    ToServer,
    ToClient,
}

impl From<DirectionArg> for Direction {
    fn from(d: DirectionArg) -> Self {
        match d {
            DirectionArg::ToServer => Direction::ToServer,
            DirectionArg::ToClient => Direction::ToClient,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum IpProtoArg {
    Tcp,
    Udp,
}

impl From<IpProtoArg> for IpProto {
    fn from(p: IpProtoArg) -> Self {
        match p {
            IpProtoArg::Tcp => IpProto::Tcp,
            IpProtoArg::Udp => IpProto::Udp,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Identify {
            input,
            direction,
            ip_proto,
            json,
        } => cmd_identify(input, direction.into(), ip_proto.into(), json),
        Commands::Patterns { json } => cmd_patterns(json),
    }
}

fn cmd_identify(
    input: Option<PathBuf>,
    direction: Direction,
    ip_proto: IpProto,
    as_json: bool,
) -> Result<()> {
    let buffer = match input {
        Some(path) => {
            std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };

    let context = builtin_context().context("building built-in detection context")?;
    let mut tctx = PerThreadState::new(&context);
    let proto = identify(&mut tctx, direction, &buffer, ip_proto);

    if as_json {
        println!(
            "{}",
            json!({
                "app_proto": proto.to_string(),
                "direction": direction.to_string(),
                "ip_proto": ip_proto.to_string(),
                "bytes_inspected": buffer.len().min(context.max_len(direction) as usize),
            })
        );
    } else {
        println!("{proto}");
    }

    Ok(())
}

fn cmd_patterns(as_json: bool) -> Result<()> {
    let context = builtin_context().context("building built-in detection context")?;

    if as_json {
        let rows: Vec<_> = context
            .signatures()
            .iter()
            .map(|s| {
                json!({
                    "app_proto": s.app_proto.to_string(),
                    "ip_proto": s.ip_proto.to_string(),
                    "direction": s.direction.to_string(),
                    "offset": s.offset,
                    "depth": s.depth,
                    "content": String::from_utf8_lossy(&s.content),
                })
            })
            .collect();
        println!("{}", json!(rows));
    } else {
        for s in context.signatures() {
            println!(
                "{:<10} {:<4} {:<10} offset={:<3} depth={:<3} content={:?}",
                s.app_proto.to_string(),
                s.ip_proto.to_string(),
                s.direction.to_string(),
                s.offset,
                s.depth,
                String::from_utf8_lossy(&s.content),
            );
        }
    }

    Ok(())
}
