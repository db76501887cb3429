// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

//! Writes a synthetic session to an LD file.
//!
//! Usage: `cargo run --example session -- [session.json] [out.ld]`
//!
//! The optional JSON file holds the session metadata, e.g.
//!
//! ```json
//! { "datetime": "2020-11-14T16:49:39", "driver": "017", "venue": "ARA",
//!   "event": { "name": "WT-20", "session": "Q3" },
//!   "vehicle_info": { "id": "RS3", "weight": 1180, "type": "TCR" } }
//! ```

use chrono::Local;
use eyre::{Result, WrapErr};
use ldfile::{Channel, LdFile, Session};
use log::info;
use std::{env, fs, path::PathBuf};


fn main() -> Result<()> {
  color_eyre::install()?;
  env_logger::init();

  let mut args = env::args().skip(1);
  let session: Session = match args.next() {
    Some(path) => {
      let json = fs::read_to_string(&path).wrap_err_with(|| {
                                             format!("could not read '{}'",
                                                     path)
                                           })?;
      serde_json::from_str(&json).wrap_err("invalid session metadata")?
    }
    None => Session::new(Local::now().naive_local()),
  };
  let out = args.next()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("session.ld"));

  // one lap around a 60 s oval, sampled at the usual rates
  let mut speed = Channel::<f32>::new(100, "Ground Speed", "Speed", "km/h");
  let mut rpm = Channel::<i32>::new(50, "Engine RPM", "RPM", "rpm");
  let mut gear = Channel::<i16>::new(10, "Gear", "Gear", "");
  for i in 0..6000 {
    let t = i as f32 / 100.0;
    speed.push(150.0 + 80.0 * (t / 60.0 * std::f32::consts::TAU).sin());
    if i % 2 == 0 {
      rpm.push(4000 + (i % 500) * 8);
    }
    if i % 10 == 0 {
      gear.push(3 + ((t / 15.0) as i16 % 3));
    }
  }

  let mut file = LdFile::new(session);
  file.add_channel(speed);
  file.add_channel(rpm);
  file.add_channel(gear);
  file.save(&out)?;

  info!("wrote {} channels to '{}'", file.channels().len(), out.display());
  Ok(())
}
