const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

pub trait StringExtensions {
    /// Last path component of a client-supplied file name, so that an upload
    /// can never escape the upload directory.
    /// E.g. `"../../etc/passwd".base_filename() == "passwd"`
    fn base_filename(&self) -> &str;

    /// Parses a path segment as a record id. Anything that is not an integer
    /// becomes `0`, an id that never exists.
    fn parse_id_or_default(&self) -> i64;
}

impl StringExtensions for str {
    fn base_filename(&self) -> &str {
        let base = self
            .trim_end_matches(PATH_SEPARATORS)
            .rsplit(PATH_SEPARATORS)
            .next()
            .unwrap_or_default();
        if base.is_empty() { "." } else { base }
    }

    fn parse_id_or_default(&self) -> i64 {
        self.parse::<i64>().unwrap_or_default()
    }
}

#[test]
fn test_base_filename() {
    assert_eq!("beach.jpg".base_filename(), "beach.jpg");
    assert_eq!("photos/2024/beach.jpg".base_filename(), "beach.jpg");
    assert_eq!("../../etc/passwd".base_filename(), "passwd");
    assert_eq!("C:\\Users\\me\\beach.jpg".base_filename(), "beach.jpg");
    assert_eq!("dir/".base_filename(), "dir");
    assert_eq!("".base_filename(), ".");
    assert_eq!("///".base_filename(), ".");
}

#[test]
fn test_parse_id_or_default() {
    assert_eq!("42".parse_id_or_default(), 42);
    assert_eq!("+7".parse_id_or_default(), 7);
    assert_eq!("abc".parse_id_or_default(), 0);
    assert_eq!("".parse_id_or_default(), 0);
    assert_eq!("1.5".parse_id_or_default(), 0);
}
