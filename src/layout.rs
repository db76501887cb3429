// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use super::{record::{CHANNEL_ID_BASE,
                     CHANNEL_META_SIZE,
                     EVENT_SIZE,
                     HEADER_SIZE,
                     VEHICLE_SIZE,
                     VENUE_SIZE},
            AnyChannel};

use eyre::{ensure, Result};
use getset::{CopyGetters, Getters};


/// Largest channel count whose ids still fit into 16 bits.
pub const MAX_CHANNELS: usize = (u16::MAX - CHANNEL_ID_BASE) as usize + 1;


/// Absolute position of every record and data block in a file.
///
/// All offsets are computed up front because the header and the event record
/// point forward into the file. Arithmetic happens in `u64`; `plan` fails if
/// the result does not fit the 32 bit fields of the format.
#[derive(Clone, Debug, PartialEq, CopyGetters, Getters)]
pub struct Layout {
  #[getset(get_copy = "pub")]
  event_offset:         u64,
  #[getset(get_copy = "pub")]
  venue_offset:         u64,
  #[getset(get_copy = "pub")]
  vehicle_offset:       u64,
  #[getset(get_copy = "pub")]
  channels_meta_offset: u64,
  #[getset(get_copy = "pub")]
  channels_data_offset: u64,
  /// Total file length in bytes.
  #[getset(get_copy = "pub")]
  end:                  u64,
  #[getset(get = "pub")]
  data_offsets:         Vec<u64>,
}

impl Layout {
  pub fn plan(channels: &[AnyChannel]) -> Result<Self> {
    let count = channels.len();
    ensure!(count <= MAX_CHANNELS,
            "too many channels ({}, at most {} supported)",
            count,
            MAX_CHANNELS);

    let event_offset = HEADER_SIZE as u64;
    let venue_offset = event_offset + EVENT_SIZE as u64;
    let vehicle_offset = venue_offset + VENUE_SIZE as u64;
    let channels_meta_offset = vehicle_offset + VEHICLE_SIZE as u64;
    let channels_data_offset =
      channels_meta_offset + CHANNEL_META_SIZE as u64 * count as u64;

    let mut data_offsets = Vec::with_capacity(count);
    let mut end = channels_data_offset;
    for channel in channels {
      ensure!(channel.len() as u64 <= u32::MAX as u64,
              "channel '{}' holds too many samples ({})",
              channel.name(),
              channel.len());
      data_offsets.push(end);
      end += channel.byte_len() as u64;
    }
    ensure!(end <= u32::MAX as u64,
            "file too large for 32 bit offsets ({} bytes)",
            end);

    Ok(Self { event_offset,
              venue_offset,
              vehicle_offset,
              channels_meta_offset,
              channels_data_offset,
              end,
              data_offsets })
  }

  pub fn channels_count(&self) -> usize {
    self.data_offsets.len()
  }

  pub fn meta_offset(&self, idx: usize) -> u64 {
    self.channels_meta_offset + CHANNEL_META_SIZE as u64 * idx as u64
  }

  /// Offset of the previous metadata record, `0` for the first channel.
  pub fn previous_meta_offset(&self, idx: usize) -> u64 {
    if idx == 0 {
      0
    } else {
      self.meta_offset(idx - 1)
    }
  }

  /// Offset of the next metadata record, `0` for the last channel.
  pub fn next_meta_offset(&self, idx: usize) -> u64 {
    if idx + 1 >= self.channels_count() {
      0
    } else {
      self.meta_offset(idx + 1)
    }
  }

  pub fn data_offset(&self, idx: usize) -> u64 {
    self.data_offsets[idx]
  }

  pub fn channel_id(&self, idx: usize) -> u16 {
    CHANNEL_ID_BASE + idx as u16
  }
}
