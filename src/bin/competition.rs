//! Competition entry point for the V5 Brain.

#[cfg(target_vendor = "vex")]
use vexide::prelude::*;

#[cfg(target_vendor = "vex")]
#[vexide::main]
async fn main(peripherals: Peripherals) {
    use log::{LevelFilter, error, warn};
    use spindlebot::{
        config::RobotConfig,
        fs::logger,
        hal::vex::{BrainScreen, VexPlatform, watch_banner},
        robot::Robot,
    };

    if let Err(e) = logger::init(LevelFilter::Info) {
        warn!("Logger Init Error: {}", e);
    }

    let robot = match Robot::new(VexPlatform, RobotConfig::competition()) {
        Ok(robot) => robot,
        Err(e) => {
            error!("Invalid Robot Configuration: {}", e);
            return;
        }
    };

    let banner = robot.initialize(BrainScreen::new(peripherals.display));
    spawn(watch_banner(banner)).detach();

    robot.compete().await;
}

#[cfg(not(target_vendor = "vex"))]
fn main() {
    eprintln!("the competition program only runs on a V5 Brain (target_vendor = \"vex\")");
    std::process::exit(1);
}
