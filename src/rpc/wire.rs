//! HTTP/JSON framing for the daemon's RPC endpoint.
//!
//! Requests are a bare HTTP/1.0 POST with a `Content-Length` header and a
//! `{method, tag, arguments?}` JSON body. Replies are read until the peer
//! closes, split at the blank line, and the body decoded as a
//! `{result, tag, arguments?}` envelope.

use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::error::{RpcError, RpcResult};
use crate::model::task::TaskRecord;

pub const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

/// Field list requested on every task-list poll
pub const TASK_FIELDS: [&str; 15] = [
    "id",
    "name",
    "status",
    "seeders",
    "leechers",
    "rateDownload",
    "rateUpload",
    "eta",
    "uploadRatio",
    "sizeWhenDone",
    "leftUntilDone",
    "addedDate",
    "announceResponse",
    "error",
    "errorString",
];

/// Integer correlating a request with its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// One-shot commands
    Command,
    TaskList,
    Stats,
    Config,
}

impl Tag {
    pub fn id(self) -> i64 {
        match self {
            Tag::Command => 1,
            Tag::TaskList => 7,
            Tag::Stats => 21,
            Tag::Config => 22,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    TorrentGet,
    SessionStats,
    SessionGet,
    SessionSet,
    TorrentStop,
    TorrentStart,
    TorrentVerify,
    TorrentRemove,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::TorrentGet => "torrent-get",
            Method::SessionStats => "session-stats",
            Method::SessionGet => "session-get",
            Method::SessionSet => "session-set",
            Method::TorrentStop => "torrent-stop",
            Method::TorrentStart => "torrent-start",
            Method::TorrentVerify => "torrent-verify",
            Method::TorrentRemove => "torrent-remove",
        }
    }
}

/// A decoded successful reply, one shape per request kind.
#[derive(Debug, Clone)]
pub enum Reply {
    TaskList(Vec<TaskRecord>),
    Stats(Map<String, Value>),
    Config(Map<String, Value>),
    /// A one-shot command was accepted
    Ack,
}

/// Build the full HTTP request for one RPC call.
pub fn encode_request(
    path: &str,
    session_id: Option<&str>,
    method: Method,
    tag: Tag,
    arguments: Option<&Value>,
) -> Vec<u8> {
    let mut body = json!({
        "method": method.as_str(),
        "tag": tag.id(),
    });
    if let (Some(args), Value::Object(map)) = (arguments, &mut body) {
        map.insert("arguments".to_string(), args.clone());
    }
    let body = body.to_string();

    let mut request = format!("POST {} HTTP/1.0\r\n", path);
    request.push_str(&format!("Content-Length: {}\r\n", body.len()));
    if let Some(id) = session_id {
        request.push_str(&format!("{}: {}\r\n", SESSION_ID_HEADER, id));
    }
    request.push_str("\r\n");
    request.push_str(&body);
    request.into_bytes()
}

/// Header block and body of a raw HTTP reply.
#[derive(Debug)]
pub struct HttpReply<'a> {
    pub status: Option<u16>,
    head: &'a str,
    pub body: &'a [u8],
}

impl HttpReply<'_> {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim())
        })
    }
}

/// Split a raw reply at the first blank line.
pub fn split_reply(raw: &[u8]) -> RpcResult<HttpReply<'_>> {
    let (head_end, body_start) = find_separator(raw).ok_or_else(|| {
        RpcError::Protocol(format!(
            "no header/body separator in {} byte reply",
            raw.len()
        ))
    })?;
    let head = std::str::from_utf8(&raw[..head_end])
        .map_err(|_| RpcError::Protocol("reply headers are not valid UTF-8".into()))?;
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse().ok());
    Ok(HttpReply {
        status,
        head,
        body: &raw[body_start..],
    })
}

fn find_separator(raw: &[u8]) -> Option<(usize, usize)> {
    if let Some(i) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
        return Some((i, i + 4));
    }
    raw.windows(2).position(|w| w == b"\n\n").map(|i| (i, i + 2))
}

#[derive(Debug, Deserialize)]
struct Envelope {
    result: String,
    #[serde(default)]
    tag: Option<i64>,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct TaskListArguments {
    torrents: Vec<TaskRecord>,
}

/// Decode a reply body for a request sent with `expected` tag.
///
/// Returns `RpcError::Application` when the envelope reports anything
/// other than success, `RpcError::Protocol` when the body does not decode.
pub fn decode_reply(body: &[u8], expected: Tag) -> RpcResult<Reply> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(RpcError::Protocol("empty reply body".into()));
    }
    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|e| RpcError::Protocol(format!("reply is not a JSON envelope: {}", e)))?;

    if let Some(tag) = envelope.tag
        && tag != expected.id()
    {
        return Err(RpcError::Protocol(format!(
            "reply tag {} does not match request tag {}",
            tag,
            expected.id()
        )));
    }
    if envelope.result != "success" {
        return Err(RpcError::Application {
            tag: expected.id(),
            result: envelope.result,
        });
    }

    let arguments = envelope.arguments.unwrap_or(Value::Object(Map::new()));
    match expected {
        Tag::Command => Ok(Reply::Ack),
        Tag::TaskList => {
            let args: TaskListArguments = serde_json::from_value(arguments)
                .map_err(|e| RpcError::Protocol(format!("bad task list: {}", e)))?;
            Ok(Reply::TaskList(args.torrents))
        }
        Tag::Stats => {
            let mut map = into_object(arguments, "session-stats")?;
            // older daemons nest the counters one level down
            if let Some(Value::Object(inner)) = map.remove("session-stats") {
                map = inner;
            }
            Ok(Reply::Stats(map))
        }
        Tag::Config => Ok(Reply::Config(into_object(arguments, "session-get")?)),
    }
}

fn into_object(value: Value, what: &str) -> RpcResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(RpcError::Protocol(format!(
            "{} arguments are not an object: {}",
            what, other
        ))),
    }
}
