#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::{Cursor, Write};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use ingest_core::compression::{create_stream_decoder, resolve, CompressionMode, DecompressionSession};
    use ingest_core::prelude::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    /// Deterministic, poorly compressible bytes.
    fn noisy(len: usize, seed: u64) -> Vec<u8> {
        let mut x = seed | 1;
        (0..len)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 7;
                x ^= x << 17;
                x as u8
            })
            .collect()
    }

    fn csv_rows(rows: usize) -> Vec<u8> {
        (0..rows).flat_map(|i| format!("{i},sensor-{},{}.5\n", i % 17, i * 3).into_bytes()).collect()
    }

    fn zstd_bytes(data: &[u8]) -> Vec<u8> {
        zstd::encode_all(Cursor::new(data), 3).expect("zstd encode")
    }

    fn zlib_bytes(data: &[u8]) -> Vec<u8> {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).expect("zlib write");
        enc.finish().expect("zlib finish")
    }

    fn fixture(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, bytes).expect("write fixture");
        path
    }

    fn source(path: &Path, codec: &str) -> FileSource {
        FileSource::from_parts(path.display().to_string(), CompressionMode::from_name(Some(codec)))
    }

    fn drain(source: &mut FileSource, buffer_size: usize) -> Result<Vec<u8>, SourceError> {
        source.open(Arc::new(FixedBufferPool::new(1, buffer_size)))?;
        let stop = StopToken::new();
        let mut buffer = TupleBuffer::with_capacity(buffer_size);
        let mut out = Vec::new();
        loop {
            let result = source.fill_tuple_buffer(&mut buffer, &stop)?;
            if let Some(session) = source.session() {
                assert!(session.invariant_holds(), "offset <= size <= capacity violated");
            }
            match result {
                FillResult::Eos => return Ok(out),
                FillResult::Bytes(n) => {
                    assert!(n <= buffer_size);
                    out.extend_from_slice(buffer.as_slice());
                }
            }
        }
    }

    #[test]
    fn zstd_file_decodes_to_original_rows() {
        let dir = TempDir::new().unwrap();
        let rows = csv_rows(5_000);
        let path = fixture(&dir, "rows.csv.zst", &zstd_bytes(&rows));

        let mut src = source(&path, "zstd");
        let out = drain(&mut src, 4096).unwrap();
        assert_eq!(out, rows);

        let snapshot = src.snapshot();
        assert_eq!(snapshot.compression, "zstd");
        assert_eq!(snapshot.bytes_delivered, rows.len() as u64);
        assert_eq!(snapshot.decompressed_bytes, rows.len() as u64);
        assert!(snapshot.expansion_ratio > 1.0);
        src.close().unwrap();
    }

    #[test]
    fn deflate_file_decodes_to_original_rows() {
        let dir = TempDir::new().unwrap();
        let rows = csv_rows(3_000);
        let path = fixture(&dir, "rows.csv.zz", &zlib_bytes(&rows));

        let mut src = source(&path, "DEFLATE");
        assert_eq!(drain(&mut src, 1000).unwrap(), rows);
    }

    #[test]
    fn concatenated_frames_decode_back_to_back() {
        let dir = TempDir::new().unwrap();
        let a = csv_rows(700);
        let b = noisy(3_000, 9);

        let mut zst = zstd_bytes(&a);
        zst.extend(zstd_bytes(&b));
        let mut zz = zlib_bytes(&a);
        zz.extend(zlib_bytes(&b));

        let expected: Vec<u8> = a.iter().chain(b.iter()).copied().collect();
        let zst_path = fixture(&dir, "two.zst", &zst);
        let zz_path = fixture(&dir, "two.zz", &zz);

        assert_eq!(drain(&mut source(&zst_path, "zstd"), 333).unwrap(), expected);
        assert_eq!(drain(&mut source(&zz_path, "deflate"), 333).unwrap(), expected);
    }

    #[test]
    fn tiny_staging_areas_do_not_lose_bytes() {
        // compressed chunks and decoded staging both much smaller than the
        // tuple buffer, so every fill spans many chunk and refill boundaries
        let dir = TempDir::new().unwrap();
        let rows = csv_rows(2_000);
        let path = fixture(&dir, "rows.zst", &zstd_bytes(&rows));

        let mut src = source(&path, "zstd").with_staging_capacities(7, 13);
        assert_eq!(drain(&mut src, 4096).unwrap(), rows);
        assert!(src.snapshot().refills > 100);
    }

    #[test]
    fn one_chunk_expanding_past_output_staging_is_fully_delivered() {
        // a single compressed chunk decodes to far more than the staging area
        let dir = TempDir::new().unwrap();
        let rows = vec![b'a'; 200_000];
        let compressed = zstd_bytes(&rows);
        let path = fixture(&dir, "zeros.zst", &compressed);

        let mut src = source(&path, "zstd").with_staging_capacities(compressed.len() + 16, 1024);
        let out = drain(&mut src, 777).unwrap();
        assert_eq!(out.len(), rows.len());
        assert_eq!(out, rows);
        assert_eq!(src.snapshot().origin_bytes_read, compressed.len() as u64);
    }

    #[test]
    fn empty_compressed_origin_is_clean_end_of_stream() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, "empty.zst", b"");
        assert!(drain(&mut source(&path, "zstd"), 64).unwrap().is_empty());
    }

    #[test]
    fn corrupt_zstd_is_a_data_integrity_error_and_sticky() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, "bad.zst", b"definitely not a zstd frame, just text");

        let mut src = source(&path, "zstd");
        let err = drain(&mut src, 64).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
        assert!(err.to_string().contains("zstd"));

        let mut buffer = TupleBuffer::with_capacity(64);
        let again = src.fill_tuple_buffer(&mut buffer, &StopToken::new()).unwrap_err();
        assert_eq!(again.kind(), ErrorKind::DataIntegrity);
        src.close().unwrap();
    }

    #[test]
    fn corrupt_deflate_is_a_data_integrity_error() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, "bad.zz", &[0x00, 0x01, 0x02, 0x03, 0x04, 0x05]);
        let err = drain(&mut source(&path, "deflate"), 64).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
    }

    #[test]
    fn truncated_streams_are_reported() {
        let dir = TempDir::new().unwrap();
        let data = noisy(50_000, 3);

        let zst = zstd_bytes(&data);
        let zz = zlib_bytes(&data);
        let zst_path = fixture(&dir, "cut.zst", &zst[..zst.len() / 2]);
        let zz_path = fixture(&dir, "cut.zz", &zz[..zz.len() / 2]);

        for (path, codec) in [(zst_path, "zstd"), (zz_path, "deflate")] {
            let err = drain(&mut source(&path, codec), 4096).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DataIntegrity, "{codec}");
            assert!(err.to_string().contains("truncated"), "{codec}: {err}");
        }
    }

    #[test]
    fn session_drives_decoder_directly() {
        let data = csv_rows(400);
        let mut origin = Cursor::new(zstd_bytes(&data));
        let decoder = create_stream_decoder(&CompressionMode::Zstd).unwrap();
        let mut session = DecompressionSession::with_capacities(decoder, 32, 64).unwrap();

        let mut counters = IngestCounters::default();
        let stop = StopToken::new();
        let mut out = Vec::new();
        let mut buf = vec![0u8; 100];
        loop {
            let n = session.fill(&mut origin, &mut buf, &stop, &mut counters).unwrap();
            assert!(session.offset() <= session.size());
            assert!(session.size() <= session.output_capacity());
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
        assert_eq!(out, data);
        assert!(session.is_end_of_stream());
        assert_eq!(counters.decompressed_bytes, data.len() as u64);
    }

    #[test]
    fn none_mode_has_no_decoder() {
        assert!(!resolve(&CompressionMode::None).unwrap().streaming);
        assert!(resolve(&CompressionMode::Zstd).unwrap().streaming);
        assert!(resolve(&CompressionMode::Deflate).unwrap().streaming);
        assert!(create_stream_decoder(&CompressionMode::None).is_err());
        let err = create_stream_decoder(&CompressionMode::from_name(Some("brotli")))
            .err()
            .expect("brotli is unsupported");
        assert_eq!(err.to_string(), "unsupported compression type: brotli");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn zstd_delivers_exact_bytes_for_any_buffer_size(
            payload in proptest::collection::vec(any::<u8>(), 0..20_000),
            buffer_size in 1usize..5000,
            input_staging in 1usize..512,
            output_staging in 1usize..2048,
        ) {
            let dir = TempDir::new().unwrap();
            let path = fixture(&dir, "p.zst", &zstd_bytes(&payload));
            let mut src = source(&path, "zstd").with_staging_capacities(input_staging, output_staging);
            let out = drain(&mut src, buffer_size).unwrap();
            prop_assert_eq!(out, payload);
        }

        #[test]
        fn deflate_delivers_exact_bytes_for_any_buffer_size(
            payload in proptest::collection::vec(any::<u8>(), 0..20_000),
            buffer_size in 1usize..5000,
            input_staging in 1usize..512,
            output_staging in 1usize..2048,
        ) {
            let dir = TempDir::new().unwrap();
            let path = fixture(&dir, "p.zz", &zlib_bytes(&payload));
            let mut src = source(&path, "deflate").with_staging_capacities(input_staging, output_staging);
            let out = drain(&mut src, buffer_size).unwrap();
            prop_assert_eq!(out, payload);
        }
    }
}
