pub mod text_audit_log;
