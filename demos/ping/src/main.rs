//! Connects to a Minecraft server, performs a STATUS handshake, and prints
//! the server's status JSON plus round-trip latency.

use std::net::SocketAddr;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use mc_protocol::connection::Connection;
use mc_protocol::packets::handshaking::{HandshakeC2s, HandshakeNextState};
use mc_protocol::packets::status::{PingRequestC2s, PongResponseS2c, StatusRequestC2s, StatusResponseS2c};
use mc_protocol::phase::Transition;
use mc_protocol::{PROTOCOL_VERSION, VarInt};
use tokio::net::TcpStream;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Address of the server to ping, e.g. localhost:25565.
    server_addr: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    let stream = TcpStream::connect(cli.server_addr)
        .await
        .with_context(|| format!("failed to connect to {}", cli.server_addr))?;
    stream.set_nodelay(true)?;

    let mut conn = Connection::new(stream);

    conn.send(&HandshakeC2s {
        protocol_version: VarInt(PROTOCOL_VERSION),
        server_address: &cli.server_addr.ip().to_string(),
        server_port: cli.server_addr.port(),
        next_state: HandshakeNextState::Status,
    })
    .await?;
    conn.transition(Transition::ToStatus);

    conn.send(&StatusRequestC2s).await?;
    let response: StatusResponseS2c = conn.recv().await?;
    info!(json = response.json, "received status response");
    println!("{}", response.json);

    let payload = Instant::now().elapsed().as_nanos() as i64;
    let sent_at = Instant::now();
    conn.send(&PingRequestC2s { payload }).await?;
    let pong: PongResponseS2c = conn.recv().await?;
    anyhow::ensure!(pong.payload == payload, "ping payload mismatch");

    println!("latency: {:?}", sent_at.elapsed());

    Ok(())
}
