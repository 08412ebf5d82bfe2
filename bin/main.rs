use tracing::{error, info};
use tracing_subscriber;

use clap::{value_t, App, Arg, ArgMatches, SubCommand};

use zfx_bootstrap::server::node;
use zfx_bootstrap::server::simulation::Simulation;
use zfx_bootstrap::server::Settings;
use zfx_bootstrap::Result;

fn config_arg() -> Arg<'static, 'static> {
    Arg::with_name("config")
        .short("c")
        .long("config")
        .value_name("CONFIG_FILE")
        .takes_value(true)
        .required(true)
}

fn count_arg(name: &'static str, short: &str, default: &'static str) -> Arg<'static, 'static> {
    Arg::with_name(name).short(short).long(name).takes_value(true).default_value(default)
}

fn settings(matches: &ArgMatches) -> Result<Settings> {
    let path = value_t!(matches.value_of("config"), String).unwrap_or_else(|e| e.exit());
    Settings::new(&path)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_level(false)
        .with_target(false)
        .without_time()
        .compact()
        .with_max_level(tracing::Level::INFO)
        .init();

    let matches = App::new("zfx-bootstrap")
        .version("0.1")
        .author("zero.fx labs ltd.")
        .about("Bootstraps a chain from its beacons or from a recovery record")
        .subcommand(
            SubCommand::with_name("check")
                .about("Validates the settings of a node")
                .arg(config_arg()),
        )
        .subcommand(
            SubCommand::with_name("replay")
                .about("Restores the chain from its recovery record")
                .arg(config_arg()),
        )
        .subcommand(
            SubCommand::with_name("export")
                .about("Writes the recovery record of the chain store")
                .arg(config_arg()),
        )
        .subcommand(
            SubCommand::with_name("simulate")
                .about("Bootstraps a fresh node from in-process beacons")
                .arg(count_arg("beacons", "n", "5"))
                .arg(count_arg("unreachable", "u", "0"))
                .arg(count_arg("lagging", "l", "0"))
                .arg(count_arg("containers", "m", "10"))
                .arg(count_arg("alpha", "a", "3")),
        )
        .get_matches();

    match matches.subcommand() {
        ("check", Some(m)) => {
            if let Err(err) = node::check(&settings(m)?) {
                error!("{}", err);
                std::process::exit(1);
            }
            info!("settings are valid");
        }
        ("replay", Some(m)) => {
            let settings = settings(m)?;
            let sys = actix::System::new();
            match sys.block_on(async move { node::replay(&settings).await })? {
                Some(node) => info!("replay finished: {:?}", node.status),
                None => info!("nothing to replay"),
            }
        }
        ("export", Some(m)) => {
            let path = node::export(&settings(m)?)?;
            info!("recovery record written to {:?}", path);
        }
        ("simulate", Some(m)) => {
            let simulation = Simulation {
                beacons: value_t!(m.value_of("beacons"), usize).unwrap_or_else(|e| e.exit()),
                unreachable: value_t!(m.value_of("unreachable"), usize)
                    .unwrap_or_else(|e| e.exit()),
                lagging: value_t!(m.value_of("lagging"), usize).unwrap_or_else(|e| e.exit()),
                containers: value_t!(m.value_of("containers"), usize)
                    .unwrap_or_else(|e| e.exit()),
                alpha: value_t!(m.value_of("alpha"), usize).unwrap_or_else(|e| e.exit()),
            };
            let sys = actix::System::new();
            let bootstrapped = sys.block_on(async move { simulation.run().await })?;
            info!("{:?}: accepted frontier of {}", bootstrapped.status, bootstrapped.chain_id);
            for id in bootstrapped.accepted.iter() {
                info!("  {}", id);
            }
        }
        _ => {
            eprintln!("{}", matches.usage());
            std::process::exit(2);
        }
    }
    Ok(())
}
