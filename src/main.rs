use std::net::{IpAddr, SocketAddr};

use camino::Utf8PathBuf;
use clap::Parser;
use swarm_canary::bootstrap;
use swarm_canary_configuration::{Configuration, Info};

/// Runs a tracker and a peer listener for one swarm, and runs the notify
/// command for every unexpected address that joins it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Command run for an unexpected address. `%IP` is replaced by the address.
    #[arg(short, long, env = "SWARM_CANARY_NOTIFY")]
    notify: Option<String>,

    /// Content hash to track, as 40 hex characters.
    #[arg(short, long)]
    info: Option<String>,

    /// File to compute the tracked content hash from.
    #[arg(short, long)]
    file: Option<Utf8PathBuf>,

    /// Host of the tracker in the torrent file. The peer listener is
    /// advertised on it too when `core.net.advertise` is `host`.
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port of the HTTP tracker.
    #[arg(short, long)]
    server_port: Option<u16>,

    /// Port of the peer listener.
    #[arg(short, long)]
    peer_port: Option<u16>,

    /// Address the swarm members are expected to come from. Can be repeated.
    #[arg(short, long)]
    expected: Vec<IpAddr>,

    /// TOML configuration file.
    #[arg(short, long, env = "SWARM_CANARY_CONFIG_TOML_PATH")]
    config: Option<Utf8PathBuf>,
}

impl Args {
    /// The command line options win over the loaded configuration.
    fn apply_to(self, configuration: &mut Configuration) {
        if let Some(notify) = self.notify {
            configuration.canary.notify_command = notify;
        }

        if let Some(info) = self.info {
            configuration.canary.info_hash = Some(info);
        }

        if let Some(file) = self.file {
            configuration.content.file = Some(file);
        }

        if let Some(host) = self.host {
            configuration.core.net.host = host;
        }

        if let Some(port) = self.server_port {
            let bind_address = configuration.http_tracker.bind_address;
            configuration.http_tracker.bind_address = SocketAddr::new(bind_address.ip(), port);
        }

        if let Some(port) = self.peer_port {
            let bind_address = configuration.peer_listener.bind_address;
            configuration.peer_listener.bind_address = SocketAddr::new(bind_address.ip(), port);
        }

        if !self.expected.is_empty() {
            configuration.canary.expected_addresses = self.expected;
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut configuration = match Configuration::load(&Info::new(args.config.clone())) {
        Ok(configuration) => configuration,
        Err(err) => exit_with(&Configuration::default(), &err),
    };

    args.apply_to(&mut configuration);

    let canary = match bootstrap::app::initialize_with_configuration(&configuration) {
        Ok(canary) => canary,
        Err(err) => exit_with(&configuration, &err),
    };

    if let Err(err) = bootstrap::app::run(&configuration, canary).await {
        exit_with(&configuration, &err);
    }
}

fn exit_with(configuration: &Configuration, err: &dyn std::error::Error) -> ! {
    // Logging may not be set up yet when the configuration fails.
    bootstrap::logging::setup(configuration);

    tracing::error!("{err}");

    std::process::exit(1)
}
