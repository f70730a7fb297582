use bambam_gtfs_collect::app::CollectApp;
use clap::Parser;

fn main() {
    env_logger::init();
    let args = CollectApp::parse();
    match args.op.run() {
        Ok(_) => log::info!("finished."),
        Err(e) => {
            log::error!("failed running bambam_gtfs_collect: {e}");
            std::process::exit(1);
        }
    }
}
