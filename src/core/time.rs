use time::{format_description::well_known::Rfc3339, OffsetDateTime, PrimitiveDateTime};

pub(crate) fn primitive_now_utc() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

pub(crate) fn format_primitive(value: PrimitiveDateTime) -> String {
    value.assume_utc().format(&Rfc3339).unwrap_or_else(|_| value.assume_utc().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn format_primitive_outputs_utc_z() {
        assert_eq!(format_primitive(datetime!(2026-04-20 08:30:15)), "2026-04-20T08:30:15Z");
    }

    #[test]
    fn primitive_now_is_close_to_offset_now() {
        let now = primitive_now_utc().assume_utc();
        let delta = OffsetDateTime::now_utc() - now;
        assert!(delta.whole_seconds().abs() < 5);
    }
}
