// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use super::{record::{self,
                     ChannelMeta,
                     Event,
                     Header,
                     Vehicle,
                     Venue},
            text::fixed,
            AnyChannel,
            Channel,
            Layout,
            Sample,
            Session};

use eyre::{Result, WrapErr};
use getset::{Getters, MutGetters};
use log::{debug, trace};
use std::{convert::TryFrom,
          ffi::OsString,
          fs,
          io::{self, BufWriter, Cursor, Seek, SeekFrom, Write},
          path::{Path, PathBuf}};


/// A complete LD file: session metadata plus an ordered list of channels.
///
/// Nothing is written until `write`, `to_bytes` or `save` is called; channels
/// may be appended to until then.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters)]
pub struct LdFile {
  #[getset(get = "pub", get_mut = "pub")]
  session:  Session,
  #[getset(get = "pub")]
  channels: Vec<AnyChannel>,
}


// CHANNEL MANAGEMENT ------------------------------------------------------- //
impl LdFile {
  pub fn new(session: Session) -> Self {
    Self { session,
           channels: Vec::new() }
  }

  pub fn add_channel<C: Into<AnyChannel>>(&mut self, channel: C) {
    self.channels.push(channel.into());
  }

  /// Appends `channels` in iteration order.
  pub fn add_channels<I: IntoIterator<Item = AnyChannel>>(&mut self,
                                                          channels: I) {
    self.channels.extend(channels);
  }

  /// Channel at `idx` if it exists and holds samples of type `T`.
  pub fn channel<T: Sample>(&self, idx: usize) -> Option<&Channel<T>> {
    self.channels.get(idx).and_then(T::downcast_ref)
  }

  pub fn channel_mut<T: Sample>(&mut self,
                                idx: usize)
                                -> Option<&mut Channel<T>> {
    self.channels.get_mut(idx).and_then(T::downcast_mut)
  }

  pub fn layout(&self) -> Result<Layout> {
    Layout::plan(&self.channels)
  }
}


// SERIALIZATION ------------------------------------------------------------ //
impl LdFile {
  /// Writes the complete file into `sink`, each record at its absolute
  /// offset.
  ///
  /// Fails before writing anything if the channels do not fit the format.
  /// An I/O error aborts the write and leaves `sink` partially written.
  pub fn write<W: Write + Seek>(&self, sink: &mut W) -> Result<()> {
    let layout = self.layout()?;
    debug!("writing {} channels, meta at {}, data at {}, {} bytes total",
           layout.channels_count(),
           layout.channels_meta_offset(),
           layout.channels_data_offset(),
           layout.end());

    sink.seek(SeekFrom::Start(0))
        .and_then(|_| self.header(&layout)?.write(sink))
        .wrap_err("could not write header")?;
    sink.seek(SeekFrom::Start(layout.event_offset()))
        .and_then(|_| self.event(&layout)?.write(sink))
        .wrap_err("could not write event")?;
    sink.seek(SeekFrom::Start(layout.venue_offset()))
        .and_then(|_| self.venue(&layout)?.write(sink))
        .wrap_err("could not write venue")?;
    sink.seek(SeekFrom::Start(layout.vehicle_offset()))
        .and_then(|_| self.vehicle().write(sink))
        .wrap_err("could not write vehicle")?;

    for (idx, channel) in self.channels.iter().enumerate() {
      let meta = self.channel_meta(&layout, idx, channel)?;
      trace!("channel {} '{}': meta at {}, {} samples at {}",
             idx,
             channel.name(),
             layout.meta_offset(idx),
             meta.data_len,
             meta.data_offset);

      sink.seek(SeekFrom::Start(layout.meta_offset(idx)))
          .and_then(|_| meta.write(sink))
          .wrap_err_with(|| {
            format!("could not write meta of channel '{}'", channel.name())
          })?;
      sink.seek(SeekFrom::Start(layout.data_offset(idx)))
          .and_then(|_| sink.write_all(&channel.encode_samples()))
          .wrap_err_with(|| {
            format!("could not write data of channel '{}'", channel.name())
          })?;
    }
    sink.flush().wrap_err("could not flush sink")?;

    debug!("wrote {} bytes", layout.end());
    Ok(())
  }

  /// Serializes the file into memory.
  pub fn to_bytes(&self) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    self.write(&mut cursor)?;
    Ok(cursor.into_inner())
  }

  /// Writes the file to `path`.
  ///
  /// Data goes to a temporary sibling file first which is renamed to `path`
  /// once everything was written, so `path` never holds a truncated file.
  pub fn save(&self, path: &Path) -> Result<()> {
    let tmp_path = partial_path(path);

    if let Err(err) = self.write_file(&tmp_path) {
      let _ = fs::remove_file(&tmp_path);
      return Err(err.wrap_err(format!("could not write '{}'",
                                      path.display())));
    }

    fs::rename(&tmp_path, path).wrap_err_with(|| {
                                 format!("could not move '{}' to '{}'",
                                         tmp_path.display(),
                                         path.display())
                               })?;
    debug!("saved '{}'", path.display());
    Ok(())
  }

  fn write_file(&self, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(fs::File::create(path)?);
    self.write(&mut writer)?;
    writer.into_inner()?.sync_all()?;
    Ok(())
  }
}


// RECORD CONSTRUCTION ------------------------------------------------------ //
impl LdFile {
  fn header(&self, layout: &Layout) -> io::Result<Header> {
    let session = &self.session;
    let datetime = session.datetime();

    Ok(Header { channels_meta_offset: fit32(layout.channels_meta_offset())?,
                channels_data_offset: fit32(layout.channels_data_offset())?,
                event_offset:         fit32(layout.event_offset())?,
                channels_count:       fit32(layout.channels_count() as u64)?,
                date:                 fixed(&datetime.format("%d/%m/%Y")
                                                     .to_string()),
                time:                 fixed(&datetime.format("%H:%M:%S")
                                                     .to_string()),
                driver:               fixed(session.driver()),
                vehicle:              fixed(session.vehicle()),
                venue:                fixed(session.venue()),
                short_comment:        fixed(session.short_comment()), })
  }

  fn event(&self, layout: &Layout) -> io::Result<Event> {
    let event = self.session.event();
    Ok(Event { name:         fixed(event.name()),
               session:      fixed(event.session()),
               comment:      fixed(event.comment()),
               venue_offset: fit16(layout.venue_offset())?, })
  }

  fn venue(&self, layout: &Layout) -> io::Result<Venue> {
    Ok(Venue { name:           fixed(self.session.venue()),
               vehicle_offset: fit16(layout.vehicle_offset())?, })
  }

  fn vehicle(&self) -> Vehicle {
    let vehicle = self.session.vehicle_info();
    Vehicle { id:      fixed(vehicle.id()),
              weight:  vehicle.weight(),
              kind:    fixed(vehicle.kind()),
              comment: fixed(vehicle.comment()), }
  }

  fn channel_meta(&self,
                  layout: &Layout,
                  idx: usize,
                  channel: &AnyChannel)
                  -> Result<ChannelMeta> {
    let (type_tag, type_width) = channel.data_type().tag_and_width();

    Ok(ChannelMeta { previous_offset: fit32(layout.previous_meta_offset(idx))?,
                     next_offset: fit32(layout.next_meta_offset(idx))?,
                     data_offset: fit32(layout.data_offset(idx))?,
                     data_len: fit32(channel.len() as u64)?,
                     channel_id: layout.channel_id(idx),
                     type_tag,
                     type_width,
                     frequency: channel.frequency(),
                     shift: record::SHIFT_DEFAULT,
                     mul: record::MUL_DEFAULT,
                     scale: record::SCALE_DEFAULT,
                     dec_places: record::DEC_PLACES_DEFAULT,
                     name: fixed(channel.name()),
                     short_name: fixed(channel.short_name()),
                     unit: fixed(channel.unit()) })
  }
}


fn fit32(offset: u64) -> io::Result<u32> {
  u32::try_from(offset).map_err(|err| {
                         io::Error::new(io::ErrorKind::InvalidInput, err)
                       })
}

fn fit16(offset: u64) -> io::Result<u16> {
  u16::try_from(offset).map_err(|err| {
                         io::Error::new(io::ErrorKind::InvalidInput, err)
                       })
}

fn partial_path(path: &Path) -> PathBuf {
  let mut name = OsString::from(path.as_os_str());
  name.push(".part");
  PathBuf::from(name)
}
