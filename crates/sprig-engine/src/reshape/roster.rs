use std::cmp::Reverse;

use serde_json::{json, Value};

use crate::reshape::no_data;

/// Status precedence: accepted members first, pending invitations second,
/// everything else (expired, revoked) last.
fn status_rank(status: &str) -> u8 {
    match status {
        "accepted" => 0,
        "pending" => 1,
        _ => 2,
    }
}

/// Care-team roster, ordered by status precedence and then by how many
/// entries each member has logged, most active first.
pub fn care_team(raw: &Value, child: &str) -> Value {
    let mut members = raw["members"].as_array().cloned().unwrap_or_default();
    if members.is_empty() {
        return no_data(format!("No care-team members are linked to {child}."));
    }

    members.sort_by_key(|m| {
        (
            status_rank(m["status"].as_str().unwrap_or("")),
            Reverse(m["entries_logged"].as_u64().unwrap_or(0)),
        )
    });

    let members: Vec<Value> = members
        .iter()
        .map(|m| {
            json!({
                "name": m["name"],
                "role": m["role"],
                "status": m["status"],
                "entries_logged": m["entries_logged"],
            })
        })
        .collect();

    json!({
        "child": child,
        "count": members.len(),
        "members": members,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(status: &str, entries: u64) -> Value {
        json!({"name": format!("{status}-{entries}"), "role": "caregiver", "status": status, "entries_logged": entries})
    }

    #[test]
    fn sorts_by_status_precedence_then_activity() {
        let raw = json!({"members": [
            member("expired", 10),
            member("pending", 0),
            member("accepted", 5),
            member("accepted", 50),
            member("pending", 2),
        ]});
        let out = care_team(&raw, "Ada");
        let order: Vec<&str> = out["members"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            order,
            vec!["accepted-50", "accepted-5", "pending-2", "pending-0", "expired-10"]
        );
    }

    #[test]
    fn unknown_status_sorts_last() {
        let raw = json!({"members": [member("revoked", 99), member("accepted", 1)]});
        let out = care_team(&raw, "Ada");
        assert_eq!(out["members"][0]["name"], json!("accepted-1"));
        assert_eq!(out["members"][1]["name"], json!("revoked-99"));
    }

    #[test]
    fn empty_roster_is_soft_no_data() {
        let out = care_team(&json!({"members": []}), "Ada");
        assert_eq!(out["no_data"], json!(true));
    }
}
