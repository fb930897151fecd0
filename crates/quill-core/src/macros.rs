/// Builds a [`Record`](crate::stmt::Record) from `field => value` pairs.
///
/// ```
/// let record = quill_core::record! { "Name" => "Ada", "Age" => 36i64 };
/// assert_eq!(record.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::stmt::Record::new()
    };
    (
        $( $field:expr => $value:expr ),+ $(,)?
    ) => {
        {
            let mut record = $crate::stmt::Record::new();
            $( record.insert($field, $value); )+
            record
        }
    };
}
