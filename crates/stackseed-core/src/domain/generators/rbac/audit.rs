use crate::domain::config::RbacConfig;
use crate::domain::entities::FileRecord;
use crate::domain::value_objects::RbacFeature;

pub(super) fn generate(cfg: &RbacConfig) -> Vec<FileRecord> {
    if !cfg.has(RbacFeature::AuditLog) {
        return Vec::new();
    }
    let dir = format!("{}lib/audit", cfg.src());
    vec![
        FileRecord::new(format!("{dir}/log.ts"), LOG),
        FileRecord::new(
            format!("{dir}/index.ts"),
            "export { recentAuditEvents, recordAudit } from \"./log\";\n",
        ),
    ]
}

const LOG: &str = r#"import type { AuditEvent } from "@/types/rbac";

const MAX_EVENTS = 1000;
const events: AuditEvent[] = [];

/** Record an access decision and emit it as one structured log line. */
export function recordAudit(event: Omit<AuditEvent, "at">): AuditEvent {
  const entry: AuditEvent = { ...event, at: new Date().toISOString() };
  events.push(entry);
  if (events.length > MAX_EVENTS) {
    events.shift();
  }
  console.info(JSON.stringify({ type: "audit", ...entry }));
  return entry;
}

/** The most recent events, oldest first. */
export function recentAuditEvents(limit = 50): readonly AuditEvent[] {
  return events.slice(-limit);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults;

    #[test]
    fn only_with_audit_log() {
        let mut cfg = defaults::rbac();
        assert!(generate(&cfg).is_empty());

        cfg.features.insert(RbacFeature::AuditLog);
        let files = generate(&cfg);
        assert_eq!(files[0].path.as_str(), "src/lib/audit/log.ts");
        assert_eq!(files[1].path.as_str(), "src/lib/audit/index.ts");
    }
}
