use clap::Parser;
use travel_sandbox::app::SandboxCliArguments;

fn main() {
    env_logger::init();
    let args = SandboxCliArguments::parse();
    match args.op.run() {
        Ok(_) => log::info!("finished."),
        Err(e) => {
            log::error!("failed running travel_sandbox: {e}");
            std::process::exit(1);
        }
    }
}
