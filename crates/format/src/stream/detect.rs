// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};

use flate2::bufread::GzDecoder;
use tracing::debug;

use crate::{
	config::ReaderConfig,
	error::Result,
	stream::{ReadStream, SeekableReader, TrackedReader},
};

pub const GZIP_SIGNATURE: [u8; 2] = [0x1f, 0x8b];

/// Open a seekable input, decompressing it when it carries a gzip signature.
///
/// Plain input stays seekable, so chunk bookmarks work. Compressed input is
/// forward-only and positions count decompressed bytes from zero.
pub fn open_input<'a, R: Read + Seek + 'a>(mut reader: R, config: &ReaderConfig) -> Result<Box<dyn ReadStream + 'a>> {
	let start = reader.stream_position()?;
	let mut signature = [0u8; 2];
	let n = read_up_to(&mut reader, &mut signature)?;
	reader.seek(SeekFrom::Start(start))?;

	let buffered = BufReader::with_capacity(config.buffer_size, reader);
	if n == GZIP_SIGNATURE.len() && signature == GZIP_SIGNATURE {
		debug!("gzip signature detected, decompressing input");
		let decoder = GzDecoder::new(buffered);
		return Ok(Box::new(TrackedReader::new(decoder, 0).with_strict_alignment(config.strict_alignment)));
	}
	Ok(Box::new(SeekableReader::new(buffered)?.with_strict_alignment(config.strict_alignment)))
}

/// Open a forward-only input such as a pipe. The input is assumed to start
/// at offset zero.
///
/// The signature is peeked through a small prefix that is chained back in
/// front of the input, so short reads from the source cannot hide it.
pub fn open_forward<'a, R: Read + 'a>(mut reader: R, config: &ReaderConfig) -> Result<Box<dyn ReadStream + 'a>> {
	let mut signature = [0u8; 2];
	let n = read_up_to(&mut reader, &mut signature)?;
	let prefix = Cursor::new(signature).take(n as u64);
	let buffered = BufReader::with_capacity(config.buffer_size, prefix.chain(reader));

	if n == GZIP_SIGNATURE.len() && signature == GZIP_SIGNATURE {
		debug!("gzip signature detected, decompressing input");
		let decoder = GzDecoder::new(buffered);
		return Ok(Box::new(TrackedReader::new(decoder, 0).with_strict_alignment(config.strict_alignment)));
	}
	Ok(Box::new(TrackedReader::new(buffered, 0).with_strict_alignment(config.strict_alignment)))
}

fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
	let mut filled = 0;
	while filled < buf.len() {
		let n = reader.read(&mut buf[filled..])?;
		if n == 0 {
			break;
		}
		filled += n;
	}
	Ok(filled)
}
