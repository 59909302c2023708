use clap::Parser;
use travel_sandbox_gbfs::app::GbfsCliArguments;

fn main() {
    env_logger::init();
    let args = GbfsCliArguments::parse();
    match args.op.run() {
        Ok(_) => log::info!("finished."),
        Err(e) => {
            log::error!("failed running travel_sandbox_gbfs: {e}");
            std::process::exit(1);
        }
    }
}
