//! In-memory transport for unit tests

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::{json, Value};
use somneo_transport::{Result, Transport, TransportError};

/// Serves canned GET documents and records every PUT
#[derive(Default)]
pub(crate) struct RecordingTransport {
    documents: RefCell<HashMap<String, Value>>,
    gets: RefCell<Vec<String>>,
    puts: RefCell<Vec<(String, Value)>>,
    fail_puts: RefCell<Option<String>>,
}

impl RecordingTransport {
    /// A device with three alarm slots and every status blob populated
    pub(crate) fn with_device_state() -> Self {
        let transport = Self::default();
        transport.respond("wulgt", json!({"ltlvl": 10, "onoff": false, "ctype": 0, "tempy": false}));
        transport.respond("wuply", json!({"onoff": false, "snddv": "fmr", "sdvol": 12, "sndch": "2"}));
        transport.respond(
            "wudsk",
            json!({"onoff": false, "curve": 20, "durat": 30, "ctype": 0, "snddv": "dus", "sndch": "1", "sndlv": 12}),
        );
        transport.respond("wusrd", json!({"mslux": 3.2, "mstmp": 21.5, "msrhu": 44.1, "mssnd": 31}));
        transport.respond("wutms", json!({"tzhrs": 1, "tzmin": 0, "dston": true}));
        transport.respond("wurlx", json!({"rtype": 0, "durat": 10}));
        transport.respond("wutmr", json!({"tmron": false}));
        transport.respond("wusts", json!({"dspon": true, "brght": 3}));
        transport.respond("wungt", json!({"onoff": false}));
        transport.respond("device", json!({"name": "Bedroom", "serial": "HF3670"}));
        transport.respond("firmware", json!({"version": "1.8.2"}));
        transport.respond("wualm", json!({"snztm": 9}));
        transport.respond("wualm/aenvs", json!({"prfen": [true, false, true]}));
        transport.respond(
            "wualm/aalms",
            json!({"almhr": [7, 9, 6], "almmn": [0, 30, 15], "daynm": [62, 0, 192]}),
        );
        transport
    }

    pub(crate) fn respond(&self, path: &str, document: Value) {
        self.documents.borrow_mut().insert(path.to_string(), document);
    }

    /// Make every following PUT fail with a 422 carrying `body`
    pub(crate) fn reject_puts(&self, body: &str) {
        *self.fail_puts.borrow_mut() = Some(body.to_string());
    }

    pub(crate) fn gets(&self) -> Vec<String> {
        self.gets.borrow().clone()
    }

    pub(crate) fn puts(&self) -> Vec<(String, Value)> {
        self.puts.borrow().clone()
    }

    pub(crate) fn last_put(&self) -> Option<(String, Value)> {
        self.puts.borrow().last().cloned()
    }
}

impl Transport for RecordingTransport {
    fn get(&self, path: &str) -> Result<Value> {
        self.gets.borrow_mut().push(path.to_string());
        self.documents
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| TransportError::RequestFailed(format!("no document at {path}")))
    }

    fn put(&self, path: &str, payload: &Value) -> Result<Value> {
        if let Some(body) = self.fail_puts.borrow().clone() {
            return Err(TransportError::InvalidRequest { body });
        }
        self.puts.borrow_mut().push((path.to_string(), payload.clone()));
        Ok(payload.clone())
    }
}
