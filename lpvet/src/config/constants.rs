pub mod compile_time {
    pub mod file_processing {
        /// Maximum file size accepted for checking (256MB)
        /// RESOURCE: the whole file is read into memory before parsing
        pub const MAX_FILE_SIZE: u64 = 256 * 1024 * 1024;

        /// Threshold for considering a file "large" (16MB)
        /// PERFORMANCE: large files are logged with a warning
        pub const LARGE_FILE_THRESHOLD: u64 = 16 * 1024 * 1024;

        /// Extension expected when `.lp` files are required or discovered
        pub const LP_FILE_EXTENSION: &str = "lp";
    }

    pub mod lexical {
        /// Maximum length of a raw input line in bytes
        /// FORMAT: longer lines are rejected before classification
        pub const MAX_LINE_LENGTH: usize = 510;

        /// Maximum length of a variable name in bytes
        /// FORMAT: longer names abort the file
        pub const MAX_VARIABLE_LENGTH: usize = 255;

        /// First non-space byte of a tool comment line
        pub const COMMENT_MARKER: u8 = b'\\';

        /// Separates a row label from the row body
        pub const LABEL_SEPARATOR: u8 = b':';

        /// Literal accepted in bounds without a declaration
        pub const RESERVED_BOUNDS_LITERAL: &[u8] = b"inf";
    }

    pub mod batch_processing {
        /// Upper bound on worker threads regardless of configuration
        /// RESOURCE: prevents thread explosion on large batches
        pub const MAX_WORKER_THREADS: usize = 32;

        /// Default worker count when parallelism cannot be detected
        pub const DEFAULT_WORKER_THREADS: usize = 4;

        /// Maximum number of files checked in one batch
        pub const MAX_FILES_PER_BATCH: usize = 100_000;
    }

    pub mod logging {
        /// Maximum number of events kept per file by the error collector
        /// RESOURCE: bounds collector memory on pathological inputs
        pub const MAX_LOG_EVENTS_PER_FILE: usize = 1_000;

        /// Maximum number of files tracked by the error collector
        pub const MAX_TRACKED_FILES: usize = 10_000;
    }
}
