#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use ingest_core::constants::params;
    use ingest_core::prelude::*;
    use ingest_core::systest::{file_file_data, file_inline_data};
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn rows() -> Vec<String> {
        vec!["1,alpha,0.5".into(), "2,beta,1.5".into(), "3,gamma,2.5".into()]
    }

    #[test]
    fn inline_rows_are_written_newline_delimited() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested").join("inline.csv");

        let cfg = file_inline_data(InlineDataArguments {
            physical_source_config: SourceConfig::new("File").with("compression", "none"),
            tuples: rows(),
            test_file_path: target.clone(),
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "1,alpha,0.5\n2,beta,1.5\n3,gamma,2.5\n");
        assert_eq!(cfg.config.get(params::FILE_PATH).map(String::as_str), Some(target.to_str().unwrap()));
        assert_eq!(cfg.config.get(params::COMPRESSION).map(String::as_str), Some("none"));
    }

    #[test]
    fn no_rows_gives_an_empty_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("empty.csv");
        file_inline_data(InlineDataArguments {
            physical_source_config: SourceConfig::new("File"),
            tuples: vec![],
            test_file_path: target.clone(),
        })
        .unwrap();
        assert_eq!(fs::metadata(&target).unwrap().len(), 0);
    }

    #[test]
    fn preset_file_path_is_a_usage_error_and_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("inline.csv");

        let err = file_inline_data(InlineDataArguments {
            physical_source_config: SourceConfig::new("File").with("file_path", "/user/data.csv"),
            tuples: rows(),
            test_file_path: target.clone(),
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(err.to_string().contains("file_path"));
        assert!(!target.exists());

        let err = file_file_data(FileDataArguments {
            physical_source_config: SourceConfig::new("File").with("file_path", "/user/data.csv"),
            test_file_path: target,
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn second_materialization_does_not_overwrite_the_first() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("inline.csv");

        let first = file_inline_data(InlineDataArguments {
            physical_source_config: SourceConfig::new("File"),
            tuples: rows(),
            test_file_path: target.clone(),
        })
        .unwrap();

        let err = file_inline_data(InlineDataArguments {
            physical_source_config: first,
            tuples: vec!["overwritten".into()],
            test_file_path: target.clone(),
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(fs::read_to_string(&target).unwrap(), "1,alpha,0.5\n2,beta,1.5\n3,gamma,2.5\n");
    }

    #[test]
    fn file_data_points_at_existing_file() {
        let cfg = file_file_data(FileDataArguments {
            physical_source_config: SourceConfig::new("File").with("compression", "zstd"),
            test_file_path: "/testdata/rows.csv.zst".into(),
        })
        .unwrap();
        assert_eq!(
            cfg,
            SourceConfig::new("File").with("compression", "zstd").with("file_path", "/testdata/rows.csv.zst")
        );
    }

    #[test]
    fn unwritable_target_is_a_resource_error() {
        let dir = TempDir::new().unwrap();
        // parent is a regular file, so the target cannot be created
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        let err = file_inline_data(InlineDataArguments {
            physical_source_config: SourceConfig::new("File"),
            tuples: rows(),
            test_file_path: blocker.join("inline.csv"),
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resource);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_target_is_a_usage_error_and_writes_nothing() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let target = dir.path().join(OsStr::from_bytes(b"rows-\xff.csv"));

        let err = file_inline_data(InlineDataArguments {
            physical_source_config: SourceConfig::new("File"),
            tuples: rows(),
            test_file_path: target.clone(),
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(err.to_string().contains("UTF-8"));
        assert!(fs::read_dir(dir.path()).unwrap().next().is_none());

        let err = file_file_data(FileDataArguments {
            physical_source_config: SourceConfig::new("File"),
            test_file_path: target,
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn inline_rows_round_trip_through_a_registered_source() {
        let dir = TempDir::new().unwrap();
        let registries = Registries::with_builtin().unwrap();

        let cfg = registries
            .inline_data("File", InlineDataArguments {
                physical_source_config: SourceConfig::new("File"),
                tuples: rows(),
                test_file_path: dir.path().join("rows.csv"),
            })
            .unwrap();

        let mut source = registries.create_from_config(&cfg).unwrap();
        source.open(Arc::new(FixedBufferPool::new(1, 8))).unwrap();
        let stop = StopToken::new();
        let mut buffer = TupleBuffer::with_capacity(8);
        let mut out = Vec::new();
        while let FillResult::Bytes(_) = source.fill_tuple_buffer(&mut buffer, &stop).unwrap() {
            out.extend_from_slice(buffer.as_slice());
        }
        source.close().unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), rows().join("\n") + "\n");
    }

    proptest! {
        #[test]
        fn materialized_rows_read_back_exactly(
            lines in proptest::collection::vec("[a-z0-9,.;]{0,24}", 0..60),
            buffer_size in 1usize..97,
        ) {
            let dir = TempDir::new().unwrap();
            let cfg = file_inline_data(InlineDataArguments {
                physical_source_config: SourceConfig::new("File"),
                tuples: lines.clone(),
                test_file_path: dir.path().join("rows.csv"),
            })
            .unwrap();

            let descriptor = Registries::with_builtin().unwrap().validate_config(&cfg).unwrap();
            let mut source = FileSource::new(&descriptor).unwrap();
            source.open(Arc::new(FixedBufferPool::new(1, buffer_size))).unwrap();
            let stop = StopToken::new();
            let mut buffer = TupleBuffer::with_capacity(buffer_size);
            let mut out = Vec::new();
            while let FillResult::Bytes(_) = source.fill_tuple_buffer(&mut buffer, &stop).unwrap() {
                out.extend_from_slice(buffer.as_slice());
            }

            let expected: String = lines.iter().map(|l| format!("{l}\n")).collect();
            prop_assert_eq!(out, expected.into_bytes());
        }
    }
}
