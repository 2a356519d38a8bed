//! Mock core for testing.
//!
//! Hands out real heap buffers for queued responses and audits their
//! release: every buffer must come back exactly once.

use std::collections::{HashMap, HashSet, VecDeque};
use std::ffi::{c_char, CString};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lb_ffi_types::{EntryPoint, ResponseKind};

use super::{NativeArg, NativeCore};

/// An argument as the mock received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedArg {
    /// String argument, decoded as UTF-8.
    Str(String),
    /// Integer argument.
    Int(u64),
}

impl RecordedArg {
    /// The string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RecordedArg::Str(s) => Some(s),
            RecordedArg::Int(_) => None,
        }
    }
}

/// One call as the mock received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Entry point invoked.
    pub entry: EntryPoint,
    /// Arguments, writeable path first.
    pub args: Vec<RecordedArg>,
}

#[derive(Debug)]
enum Queued {
    Json(String),
    Null,
    Panic(String),
}

/// Mock core for testing.
///
/// Queue responses per entry point, then inspect the recorded calls and the
/// release ledger. An entry point with nothing queued answers with a core
/// `Unexpected` error naming the entry point.
#[derive(Debug, Default)]
pub struct MockCore {
    inner: Arc<Mutex<MockCoreInner>>,
}

#[derive(Debug, Default)]
struct MockCoreInner {
    queued: HashMap<EntryPoint, VecDeque<Queued>>,
    calls: Vec<RecordedCall>,
    outstanding: HashSet<usize>,
    handed_out: usize,
    released: usize,
    double_releases: usize,
    in_flight: usize,
    max_in_flight: usize,
    delay: Option<Duration>,
}

impl MockCore {
    /// Create a new mock core.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw JSON response for the next call to `entry`.
    pub fn queue_response(&self, entry: EntryPoint, json: &str) {
        self.push(entry, Queued::Json(json.to_string()));
    }

    /// Queue `{"tag":"Ok","content":<content>}`.
    pub fn queue_ok(&self, entry: EntryPoint, content: serde_json::Value) {
        let json = serde_json::json!({ "tag": "Ok", "content": content });
        self.push(entry, Queued::Json(json.to_string()));
    }

    /// Queue an expected error by name.
    pub fn queue_ui_error(&self, entry: EntryPoint, name: &str) {
        let json = serde_json::json!({
            "tag": "Err",
            "content": { "tag": "UiError", "content": name }
        });
        self.push(entry, Queued::Json(json.to_string()));
    }

    /// Queue a core-side unexpected error.
    pub fn queue_unexpected(&self, entry: EntryPoint, msg: &str) {
        let json = serde_json::json!({
            "tag": "Err",
            "content": { "tag": "Unexpected", "content": msg }
        });
        self.push(entry, Queued::Json(json.to_string()));
    }

    /// Make the next call to `entry` return a null pointer.
    pub fn queue_null(&self, entry: EntryPoint) {
        self.push(entry, Queued::Null);
    }

    /// Make the next call to `entry` panic inside the core.
    pub fn queue_panic(&self, entry: EntryPoint, msg: &str) {
        self.push(entry, Queued::Panic(msg.to_string()));
    }

    /// Hold every call for `delay` before answering.
    pub fn set_call_delay(&self, delay: Duration) {
        self.inner.lock().unwrap().delay = Some(delay);
    }

    /// Every call received, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// The last call received.
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.inner.lock().unwrap().calls.last().cloned()
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }

    /// Number of response buffers handed out.
    pub fn handed_out(&self) -> usize {
        self.inner.lock().unwrap().handed_out
    }

    /// Number of buffers released exactly once.
    pub fn released(&self) -> usize {
        self.inner.lock().unwrap().released
    }

    /// Buffers handed out and not yet released.
    pub fn outstanding(&self) -> usize {
        self.inner.lock().unwrap().outstanding.len()
    }

    /// Releases of pointers that were not outstanding.
    pub fn double_releases(&self) -> usize {
        self.inner.lock().unwrap().double_releases
    }

    /// Highest number of calls observed inside the core at once.
    pub fn max_concurrent_calls(&self) -> usize {
        self.inner.lock().unwrap().max_in_flight
    }

    fn push(&self, entry: EntryPoint, response: Queued) {
        let mut inner = self.inner.lock().unwrap();
        inner.queued.entry(entry).or_default().push_back(response);
    }
}

impl Clone for MockCore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl NativeCore for MockCore {
    fn call(&self, entry: EntryPoint, args: &[NativeArg]) -> *mut c_char {
        let (response, delay) = {
            let mut inner = self.inner.lock().unwrap();
            inner.in_flight += 1;
            inner.max_in_flight = inner.max_in_flight.max(inner.in_flight);
            inner.calls.push(RecordedCall {
                entry,
                args: args.iter().map(record).collect(),
            });
            let response = inner
                .queued
                .get_mut(&entry)
                .and_then(VecDeque::pop_front);
            (response, inner.delay)
        };

        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }

        let response = response.unwrap_or_else(|| {
            let json = serde_json::json!({
                "tag": "Err",
                "content": {
                    "tag": "Unexpected",
                    "content": format!("mock: no response queued for {entry}")
                }
            });
            Queued::Json(json.to_string())
        });

        let mut inner = self.inner.lock().unwrap();
        inner.in_flight -= 1;

        match response {
            Queued::Panic(msg) => {
                drop(inner);
                panic!("{msg}");
            }
            _ if entry.response_kind() == ResponseKind::Void => std::ptr::null_mut(),
            Queued::Null => std::ptr::null_mut(),
            Queued::Json(json) => {
                let ptr = CString::new(json).unwrap().into_raw();
                inner.outstanding.insert(ptr as usize);
                inner.handed_out += 1;
                ptr
            }
        }
    }

    unsafe fn release(&self, ptr: *mut c_char) {
        let mut inner = self.inner.lock().unwrap();
        if inner.outstanding.remove(&(ptr as usize)) {
            inner.released += 1;
            drop(CString::from_raw(ptr));
        } else {
            inner.double_releases += 1;
        }
    }
}

fn record(arg: &NativeArg) -> RecordedArg {
    match arg {
        NativeArg::Str(s) => RecordedArg::Str(s.to_string_lossy().into_owned()),
        NativeArg::Int(n) => RecordedArg::Int(*n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    fn read(ptr: *mut c_char) -> String {
        unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
    }

    #[test]
    fn queued_responses_come_back_in_order() {
        let core = MockCore::new();
        core.queue_response(EntryPoint::GetRoot, "first");
        core.queue_response(EntryPoint::GetRoot, "second");

        let a = core.call(EntryPoint::GetRoot, &[]);
        let b = core.call(EntryPoint::GetRoot, &[]);
        assert_eq!(read(a), "first");
        assert_eq!(read(b), "second");
        assert_eq!(core.outstanding(), 2);

        unsafe {
            core.release(a);
            core.release(b);
        }
        assert_eq!(core.released(), 2);
        assert_eq!(core.outstanding(), 0);
    }

    #[test]
    fn unqueued_entry_answers_unexpected() {
        let core = MockCore::new();
        let ptr = core.call(EntryPoint::SyncAll, &[]);
        assert!(read(ptr).contains("no response queued for sync_all"));
        unsafe { core.release(ptr) };
    }

    #[test]
    fn double_release_is_counted_not_freed() {
        let core = MockCore::new();
        core.queue_response(EntryPoint::GetRoot, "{}");
        let ptr = core.call(EntryPoint::GetRoot, &[]);
        unsafe {
            core.release(ptr);
            core.release(ptr);
        }
        assert_eq!(core.released(), 1);
        assert_eq!(core.double_releases(), 1);
    }

    #[test]
    fn arguments_are_recorded() {
        let core = MockCore::new();
        core.queue_null(EntryPoint::SetLastSynced);
        let args = [
            NativeArg::string(EntryPoint::SetLastSynced, 0, "/data/lb").unwrap(),
            NativeArg::Int(1_700_000_000_000),
        ];
        assert!(core.call(EntryPoint::SetLastSynced, &args).is_null());

        let call = core.last_call().unwrap();
        assert_eq!(call.entry, EntryPoint::SetLastSynced);
        assert_eq!(
            call.args,
            vec![
                RecordedArg::Str("/data/lb".to_string()),
                RecordedArg::Int(1_700_000_000_000)
            ]
        );
    }

    #[test]
    fn void_entries_never_allocate() {
        let core = MockCore::new();
        core.queue_response(EntryPoint::InitLoggerSafely, "ignored");
        assert!(core.call(EntryPoint::InitLoggerSafely, &[]).is_null());
        assert_eq!(core.handed_out(), 0);
    }

    #[test]
    fn clones_share_state() {
        let core = MockCore::new();
        let other = core.clone();
        other.queue_response(EntryPoint::GetRoot, "x");
        let ptr = core.call(EntryPoint::GetRoot, &[]);
        unsafe { core.release(ptr) };
        assert_eq!(other.released(), 1);
        assert_eq!(other.call_count(), 1);
    }
}
