//! In-memory connector for exercising the session without sockets.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read, Write};
use std::rc::Rc;

use serde_json::Value;

use super::transport::{Connection, Connector};

/// One scripted read result. When the script runs out the stream reports
/// EOF.
#[derive(Debug, Clone)]
pub enum Step {
    Data(Vec<u8>),
    WouldBlock,
    Fail(ErrorKind),
}

type Responder = Box<dyn FnMut(&Value) -> Vec<Step>>;

pub struct ScriptedConnection {
    index: usize,
    log: Rc<RefCell<Vec<Vec<u8>>>>,
    steps: Option<VecDeque<Step>>,
    responder: Option<Rc<RefCell<Responder>>>,
}

impl ScriptedConnection {
    fn script(&mut self) -> &mut VecDeque<Step> {
        if self.steps.is_none() {
            let sent = self.log.borrow()[self.index].clone();
            let steps = match &self.responder {
                Some(responder) => {
                    let body = request_body(&sent);
                    (*responder.borrow_mut())(&body)
                }
                None => Vec::new(),
            };
            self.steps = Some(steps.into());
        }
        self.steps.get_or_insert_with(VecDeque::new)
    }
}

impl Read for ScriptedConnection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.script().pop_front() {
            None => Ok(0),
            Some(Step::WouldBlock) => Err(ErrorKind::WouldBlock.into()),
            Some(Step::Fail(kind)) => Err(kind.into()),
            Some(Step::Data(mut data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    let rest = data.split_off(n);
                    self.script().push_front(Step::Data(rest));
                }
                Ok(n)
            }
        }
    }
}

impl Write for ScriptedConnection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.log.borrow_mut()[self.index].extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Connection for ScriptedConnection {
    fn set_nonblocking(&mut self, _nonblocking: bool) -> io::Result<()> {
        Ok(())
    }
}

/// Hands out scripted connections, either from an explicit queue of
/// replies or by asking a responder that sees each decoded request body.
#[derive(Default)]
pub struct ScriptedConnector {
    queued: VecDeque<Vec<Step>>,
    responder: Option<Rc<RefCell<Responder>>>,
    refuse: bool,
    log: Rc<RefCell<Vec<Vec<u8>>>>,
}

impl ScriptedConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responder(f: impl FnMut(&Value) -> Vec<Step> + 'static) -> Self {
        ScriptedConnector {
            responder: Some(Rc::new(RefCell::new(Box::new(f)))),
            ..Self::default()
        }
    }

    pub fn push_reply(&mut self, steps: Vec<Step>) {
        self.queued.push_back(steps);
    }

    pub fn refuse_next(&mut self) {
        self.refuse = true;
    }

    pub fn connections(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn sent(&self, index: usize) -> Vec<u8> {
        self.log.borrow()[index].clone()
    }

    /// Decoded JSON bodies of every request written so far
    pub fn sent_bodies(&self) -> Vec<Value> {
        self.log.borrow().iter().map(|raw| request_body(raw)).collect()
    }
}

impl Connector for ScriptedConnector {
    type Conn = ScriptedConnection;

    fn connect(&mut self) -> io::Result<ScriptedConnection> {
        if std::mem::take(&mut self.refuse) {
            return Err(ErrorKind::ConnectionRefused.into());
        }
        let index = {
            let mut log = self.log.borrow_mut();
            log.push(Vec::new());
            log.len() - 1
        };
        let steps = self.queued.pop_front().map(VecDeque::from);
        Ok(ScriptedConnection {
            index,
            log: Rc::clone(&self.log),
            responder: if steps.is_none() {
                self.responder.clone()
            } else {
                None
            },
            steps,
        })
    }

    fn endpoint(&self) -> String {
        "scripted:9091".to_string()
    }
}

fn request_body(raw: &[u8]) -> Value {
    let text = String::from_utf8_lossy(raw);
    text.split_once("\r\n\r\n")
        .and_then(|(_, body)| serde_json::from_str(body).ok())
        .unwrap_or(Value::Null)
}

/// A complete `200 OK` reply carrying `body`.
pub fn ok_reply(body: &Value) -> Vec<Step> {
    let mut raw = b"HTTP/1.0 200 OK\r\nContent-Type: application/json\r\n\r\n".to_vec();
    raw.extend_from_slice(body.to_string().as_bytes());
    vec![Step::Data(raw)]
}
