use schemadoc_core::TriggerOrientation;

// pg_trigger.tgtype bit layout.
const TGTYPE_ROW: i16 = 1;
const TGTYPE_BEFORE: i16 = 2;
const TGTYPE_INSERT: i16 = 4;
const TGTYPE_DELETE: i16 = 8;
const TGTYPE_UPDATE: i16 = 16;
const TGTYPE_INSTEAD: i16 = 64;

/// Decode the timing keyword from a packed `tgtype` bitmask.
pub fn trigger_timing(tgtype: i16) -> &'static str {
    if tgtype & TGTYPE_INSTEAD != 0 {
        "INSTEAD OF"
    } else if tgtype & TGTYPE_BEFORE != 0 {
        "BEFORE"
    } else {
        "AFTER"
    }
}

/// Event strings for the flagged actions, in INSERT/DELETE/UPDATE order.
pub fn trigger_events(tgtype: i16) -> Vec<String> {
    let timing = trigger_timing(tgtype);
    let mut events = Vec::new();
    for (bit, action) in [
        (TGTYPE_INSERT, "INSERT"),
        (TGTYPE_DELETE, "DELETE"),
        (TGTYPE_UPDATE, "UPDATE"),
    ] {
        if tgtype & bit != 0 {
            events.push(format!("{timing} {action}"));
        }
    }
    events
}

/// Row-level vs statement-level firing.
pub fn trigger_orientation(tgtype: i16) -> TriggerOrientation {
    if tgtype & TGTYPE_ROW != 0 {
        TriggerOrientation::Row
    } else {
        TriggerOrientation::Statement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_before_insert_row_trigger() {
        // ROW | BEFORE | INSERT
        let tgtype = 1 | 2 | 4;
        assert_eq!(trigger_timing(tgtype), "BEFORE");
        assert_eq!(trigger_events(tgtype), vec!["BEFORE INSERT"]);
        assert_eq!(trigger_orientation(tgtype), TriggerOrientation::Row);
    }

    #[test]
    fn decodes_after_statement_trigger_with_multiple_actions() {
        // DELETE | UPDATE, statement level, no BEFORE/INSTEAD bits
        let tgtype = 8 | 16;
        assert_eq!(trigger_timing(tgtype), "AFTER");
        assert_eq!(trigger_events(tgtype), vec!["AFTER DELETE", "AFTER UPDATE"]);
        assert_eq!(trigger_orientation(tgtype), TriggerOrientation::Statement);
    }

    #[test]
    fn instead_of_wins_over_before() {
        let tgtype = 1 | 2 | 4 | 64;
        assert_eq!(trigger_timing(tgtype), "INSTEAD OF");
        assert_eq!(trigger_events(tgtype), vec!["INSTEAD OF INSERT"]);
    }

    #[test]
    fn events_contain_no_duplicates() {
        let tgtype = 1 | 2 | 4 | 8 | 16;
        let events = trigger_events(tgtype);
        let mut deduped = events.clone();
        deduped.dedup();
        assert_eq!(events, deduped);
        assert_eq!(
            events,
            vec!["BEFORE INSERT", "BEFORE DELETE", "BEFORE UPDATE"]
        );
    }
}
