// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Time values are counted in 100 ns ticks. Date-times count ticks from
//! 0001-01-01T00:00:00; the top two bits of the stored word are a kind
//! marker, written as zero and ignored on read.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};

use crate::{
	column::ColumnCodec,
	error::{FormatError, Result},
	model::Value,
	primitive::{Decode, Encode},
	stream::{ReadStream, WriteStream},
};

pub const TICKS_PER_SECOND: i64 = 10_000_000;

const NANOS_PER_TICK: i64 = 100;

const TICKS_MASK: u64 = 0x3FFF_FFFF_FFFF_FFFF;

fn epoch() -> Option<NaiveDateTime> {
	NaiveDate::from_ymd_opt(1, 1, 1)?.and_hms_opt(0, 0, 0)
}

pub fn time_to_ticks(delta: TimeDelta) -> Option<i64> {
	delta.num_seconds().checked_mul(TICKS_PER_SECOND)?.checked_add(i64::from(delta.subsec_nanos()) / NANOS_PER_TICK)
}

pub fn ticks_to_time(ticks: i64) -> TimeDelta {
	TimeDelta::seconds(ticks / TICKS_PER_SECOND) + TimeDelta::nanoseconds((ticks % TICKS_PER_SECOND) * NANOS_PER_TICK)
}

pub fn datetime_to_ticks(value: &NaiveDateTime) -> Option<i64> {
	let ticks = time_to_ticks(value.signed_duration_since(epoch()?))?;
	(0..=TICKS_MASK as i64).contains(&ticks).then_some(ticks)
}

pub fn datetime_from_ticks(ticks: i64) -> Option<NaiveDateTime> {
	epoch()?.checked_add_signed(ticks_to_time(ticks))
}

impl ColumnCodec {
	pub(super) fn write_time<W: WriteStream + ?Sized>(&self, stream: &mut W, value: Option<&Value>) -> Result<()> {
		let ticks = match value {
			None => 0,
			Some(Value::Time(v)) => time_to_ticks(*v).ok_or_else(|| self.invalid("time out of range"))?,
			Some(other) => return Err(self.mismatch(other)),
		};
		stream.put_i64(ticks)
	}

	pub(super) fn read_time<R: ReadStream + ?Sized>(&self, stream: &mut R) -> Result<Value> {
		Ok(Value::Time(ticks_to_time(stream.get_i64()?)))
	}

	pub(super) fn write_datetime<W: WriteStream + ?Sized>(&self, stream: &mut W, value: Option<&Value>) -> Result<()> {
		let ticks = match value {
			None => 0,
			Some(Value::DateTime(v)) => datetime_to_ticks(v).ok_or_else(|| self.invalid("datetime out of range"))?,
			Some(other) => return Err(self.mismatch(other)),
		};
		stream.put_i64(ticks)
	}

	pub(super) fn read_datetime<R: ReadStream + ?Sized>(&self, stream: &mut R) -> Result<Value> {
		let ticks = (stream.get_u64()? & TICKS_MASK) as i64;
		let value = datetime_from_ticks(ticks).ok_or_else(|| self.corrupt_ticks(ticks))?;
		Ok(Value::DateTime(value))
	}

	/// Local clock time followed by the UTC offset in minutes.
	pub(super) fn write_datetime_offset<W: WriteStream + ?Sized>(
		&self,
		stream: &mut W,
		value: Option<&Value>,
	) -> Result<()> {
		let (ticks, minutes) = match value {
			None => (0, 0),
			Some(Value::DateTimeOffset(v)) => {
				let seconds = v.offset().local_minus_utc();
				if seconds % 60 != 0 {
					return Err(self.invalid("offset is not a whole number of minutes"));
				}
				let ticks = datetime_to_ticks(&v.naive_local())
					.ok_or_else(|| self.invalid("datetime out of range"))?;
				(ticks, seconds / 60)
			}
			Some(other) => return Err(self.mismatch(other)),
		};
		stream.put_i64(ticks)?;
		stream.put_i32(minutes)
	}

	pub(super) fn read_datetime_offset<R: ReadStream + ?Sized>(&self, stream: &mut R) -> Result<Value> {
		let ticks = (stream.get_u64()? & TICKS_MASK) as i64;
		let minutes = stream.get_i32()?;

		let local = datetime_from_ticks(ticks).ok_or_else(|| self.corrupt_ticks(ticks))?;
		let offset = minutes
			.checked_mul(60)
			.and_then(FixedOffset::east_opt)
			.ok_or_else(|| FormatError::corrupt(format!("column '{}': invalid offset {minutes} minutes", self.name)))?;
		let value = offset.from_local_datetime(&local).single().ok_or_else(|| self.corrupt_ticks(ticks))?;
		Ok(Value::DateTimeOffset(value))
	}

	fn corrupt_ticks(&self, ticks: i64) -> FormatError {
		FormatError::corrupt(format!("column '{}': datetime ticks {ticks} out of range", self.name))
	}
}
