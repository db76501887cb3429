// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use chrono::NaiveDateTime;
use getset::{CopyGetters, Getters, Setters};
use serde::{Deserialize, Serialize};


/// Descriptive information about a logging session.
///
/// Text fields are stored in fixed-width fields and silently truncated on
/// write: driver, vehicle, venue and short comment to 64 bytes each.
#[derive(Clone, Debug, Default, PartialEq, CopyGetters, Getters, Setters, Deserialize, Serialize)]
#[serde(default)]
pub struct Session {
  #[getset(get_copy = "pub", set = "pub")]
  datetime:      NaiveDateTime,
  #[getset(get = "pub", set = "pub")]
  driver:        String,
  #[getset(get = "pub", set = "pub")]
  vehicle:       String,
  #[getset(get = "pub", set = "pub")]
  venue:         String,
  #[getset(get = "pub", set = "pub")]
  short_comment: String,
  #[getset(get = "pub", set = "pub")]
  event:         EventInfo,
  #[getset(get = "pub", set = "pub")]
  vehicle_info:  VehicleInfo,
}

impl Session {
  pub fn new(datetime: NaiveDateTime) -> Self {
    Self { datetime,
           driver: String::new(),
           vehicle: String::new(),
           venue: String::new(),
           short_comment: String::new(),
           event: EventInfo::default(),
           vehicle_info: VehicleInfo::default() }
  }
}


/// Name is truncated to 64 bytes, session to 64 and comment to 1024.
#[derive(Clone, Debug, Default, PartialEq, Getters, Setters, Deserialize, Serialize)]
#[getset(get = "pub", set = "pub")]
#[serde(default)]
pub struct EventInfo {
  name:    String,
  session: String,
  comment: String,
}

impl EventInfo {
  pub fn new(name: &str, session: &str, comment: &str) -> Self {
    Self { name:    name.to_owned(),
           session: session.to_owned(),
           comment: comment.to_owned(), }
  }
}


/// Id is truncated to 64 bytes, type and comment to 32 each.
#[derive(Clone, Debug, Default, PartialEq, CopyGetters, Getters, Setters, Deserialize, Serialize)]
#[serde(default)]
pub struct VehicleInfo {
  #[getset(get = "pub", set = "pub")]
  id:      String,
  /// kg
  #[getset(get_copy = "pub", set = "pub")]
  weight:  u32,
  #[serde(rename = "type")]
  #[getset(get = "pub", set = "pub")]
  kind:    String,
  #[getset(get = "pub", set = "pub")]
  comment: String,
}

impl VehicleInfo {
  pub fn new(id: &str, weight: u32, kind: &str, comment: &str) -> Self {
    Self { id: id.to_owned(),
           weight,
           kind: kind.to_owned(),
           comment: comment.to_owned() }
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;
  use pretty_assertions::assert_eq;

  fn datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 11, 14).unwrap()
                                         .and_hms_opt(16, 49, 39)
                                         .unwrap()
  }

  #[test]
  fn session_test() {
    let mut session = Session::new(datetime());
    session.set_driver("017".to_string())
           .set_vehicle("AU-RS3-R5-S-S".to_string())
           .set_venue("ARA".to_string())
           .set_event(EventInfo::new("WT-20", "Q3", ""))
           .set_vehicle_info(VehicleInfo::new("RS3", 1180, "TCR", ""));

    assert_eq!(datetime(), session.datetime());
    assert_eq!("017", session.driver());
    assert_eq!("AU-RS3-R5-S-S", session.vehicle());
    assert_eq!("ARA", session.venue());
    assert_eq!("", session.short_comment());
    assert_eq!("Q3", session.event().session());
    assert_eq!(1180, session.vehicle_info().weight());
    assert_eq!("TCR", session.vehicle_info().kind());
  }

  #[test]
  fn deserialize_test() {
    let json = r#"{
      "datetime": "2020-11-14T16:49:39",
      "driver": "017",
      "event": { "name": "WT-20", "session": "Q3" },
      "vehicle_info": { "id": "RS3", "weight": 1180, "type": "TCR" }
    }"#;
    let session: Session = serde_json::from_str(json).unwrap();

    assert_eq!(datetime(), session.datetime());
    assert_eq!("017", session.driver());
    assert_eq!("", session.venue());
    assert_eq!(&EventInfo::new("WT-20", "Q3", ""), session.event());
    assert_eq!(&VehicleInfo::new("RS3", 1180, "TCR", ""),
               session.vehicle_info());
  }
}
