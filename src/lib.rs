// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

//! Writes telemetry sessions as LD files, the format read by MoTeC i2.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use ldfile::{Channel, LdFile, Session};
//! use std::path::Path;
//!
//! # fn main() -> eyre::Result<()> {
//! let datetime = NaiveDate::from_ymd_opt(2020, 11, 14).unwrap()
//!                                                     .and_hms_opt(16, 49, 39)
//!                                                     .unwrap();
//! let mut session = Session::new(datetime);
//! session.set_driver("017".to_string());
//!
//! let mut speed = Channel::<f32>::new(100, "Speed", "SPD", "km/h");
//! speed.push(0.0);
//! speed.push(10.5);
//!
//! let mut file = LdFile::new(session);
//! file.add_channel(speed);
//! file.save(Path::new("session.ld"))?;
//! # Ok(())
//! # }
//! ```

mod channel;
mod data_type;
mod layout;
mod ld_file;
pub mod record;
mod session;
mod text;

pub use channel::{AnyChannel, Channel, Sample};
pub use data_type::DataType;
pub use layout::{Layout, MAX_CHANNELS};
pub use ld_file::LdFile;
pub use session::{EventInfo, Session, VehicleInfo};
