extern crate env_logger;
extern crate ggafix;
#[macro_use]
extern crate log;

use std::io;

use ggafix::{GgaReader, LastFix};

fn main() {
    env_logger::init();

    let stdin = io::stdin();
    let mut last = LastFix::new();
    for result in GgaReader::new(stdin.lock()) {
        match result {
            Ok(ref fix) => println!(
                "{} {:?} {:?} {:?} {:?}",
                fix.talker,
                fix.utc_time(),
                fix.position(),
                fix.altitude,
                fix.quality_or_no_fix()
            ),
            Err(ref e) => error!("{}", e),
        }
        last.update(&result);
    }

    info!("{} fixes, {} rejected", last.accepted(), last.rejected());
    if let Some(fix) = last.get() {
        println!("last fix: {:?}", fix);
    }
}
