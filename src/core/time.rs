use time::{format_description::well_known::Rfc3339, OffsetDateTime, PrimitiveDateTime, UtcOffset};

pub(crate) fn primitive_now_utc() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

pub(crate) fn to_primitive_utc(value: OffsetDateTime) -> PrimitiveDateTime {
    let utc = value.to_offset(UtcOffset::UTC);
    PrimitiveDateTime::new(utc.date(), utc.time())
}

pub(crate) fn format_primitive(value: PrimitiveDateTime) -> String {
    value.assume_utc().format(&Rfc3339).unwrap_or_else(|_| value.assume_utc().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Date, Time, UtcOffset};

    #[test]
    fn format_primitive_outputs_utc_z() {
        let date = Date::from_calendar_date(2026, time::Month::February, 3).unwrap();
        let time = Time::from_hms(11, 22, 33).unwrap();
        let value = PrimitiveDateTime::new(date, time);
        assert_eq!(format_primitive(value), "2026-02-03T11:22:33Z");
    }

    #[test]
    fn to_primitive_utc_normalizes_offset() {
        let date = Date::from_calendar_date(2026, time::Month::February, 3).unwrap();
        let time = Time::from_hms(12, 0, 0).unwrap();
        let offset = UtcOffset::from_hms(3, 0, 0).unwrap();
        let value = PrimitiveDateTime::new(date, time).assume_offset(offset);
        assert_eq!(format_primitive(to_primitive_utc(value)), "2026-02-03T09:00:00Z");
    }
}
