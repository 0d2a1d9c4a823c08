//! # Printer Command Dispatcher
//!
//! Maps named commands with dynamic arguments onto the printer driver
//! and translates every outcome into exactly one response.
//!
//! The dispatcher owns the single printer session slot: `open` creates
//! a session through the caller-supplied [`DriverFactory`], every
//! other session-dependent command is gated behind a liveness check,
//! and `beginPrint`/`printTest` suspend the caller until the driver's
//! terminal job event arrives.
//!
//! ## Example
//!
//! ```
//! use puente::dispatch::{CommandRequest, CommandResponse, Dispatcher};
//!
//! # async fn example() {
//! let dispatcher = Dispatcher::simulated();
//! let response = dispatcher.dispatch(&CommandRequest::bare("open")).await;
//! assert!(matches!(response, CommandResponse::Ok { .. }));
//! # }
//! ```

mod args;
mod job;
mod session;

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;

use base64::prelude::{BASE64_STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::driver::{FontSize, Position, PrintLine, PrinterDriver, SimulatedDriver, TextLine};
use crate::error::{BridgeError, BridgeResult};
use args::Args;
use job::JobSlot;
use session::Session;

/// Builds a fresh driver instance for each `open`.
pub type DriverFactory = Box<dyn Fn() -> Box<dyn PrinterDriver> + Send + Sync>;

/// One incoming command: a method name plus named arguments.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRequest {
    pub method: String,
    #[serde(default)]
    pub args: HashMap<String, Value>,
}

impl CommandRequest {
    /// A request with no arguments.
    pub fn bare(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            args: HashMap::new(),
        }
    }
}

/// The success payload of a command: boolean, integer, or string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl From<bool> for ResponseValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ResponseValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for ResponseValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Exactly one response per command invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandResponse {
    /// The command succeeded with a payload.
    Ok { result: ResponseValue },
    /// The command failed; the record reaches the caller verbatim.
    Error { code: String, message: String },
    /// The method name is not part of the command set.
    NotImplemented { method: String },
}

impl From<BridgeError> for CommandResponse {
    fn from(err: BridgeError) -> Self {
        Self::Error {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// The fixed command set of the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    GetPlatformVersion,
    Open,
    Close,
    Status,
    BeforePrinterLength,
    PrinterLength,
    LineWrap,
    SetLineSpace,
    SetPrintFont,
    SetPrintGray,
    AddPrintLine,
    AddPrintBase64,
    CleanCache,
    BeginPrint,
    PrintTest,
}

impl Command {
    fn parse(method: &str) -> Option<Self> {
        Some(match method {
            "getPlatformVersion" => Self::GetPlatformVersion,
            "open" => Self::Open,
            "close" => Self::Close,
            "status" => Self::Status,
            "beforePrinterLength" => Self::BeforePrinterLength,
            "printerLength" => Self::PrinterLength,
            "lineWrap" => Self::LineWrap,
            "setLineSpace" => Self::SetLineSpace,
            "setPrintFont" => Self::SetPrintFont,
            "setPrintGray" => Self::SetPrintGray,
            "addPrintLine" => Self::AddPrintLine,
            "addPrintBase64" => Self::AddPrintBase64,
            "cleanCache" => Self::CleanCache,
            "beginPrint" => Self::BeginPrint,
            "printTest" => Self::PrintTest,
            _ => return None,
        })
    }
}

/// Command dispatcher owning the single printer session slot.
///
/// One instance per active channel; the session lives inside the
/// dispatcher rather than in any global state.
pub struct Dispatcher {
    factory: DriverFactory,
    session: Mutex<Option<Session>>,
    printing: AtomicBool,
}

impl Dispatcher {
    pub fn new(factory: DriverFactory) -> Self {
        Self {
            factory,
            session: Mutex::new(None),
            printing: AtomicBool::new(false),
        }
    }

    /// A dispatcher backed by the in-process simulated driver.
    pub fn simulated() -> Self {
        Self::new(Box::new(|| {
            Box::new(SimulatedDriver::new()) as Box<dyn PrinterDriver>
        }))
    }

    /// Dispatch one command and produce its response.
    ///
    /// Unrecognized method names yield the distinct
    /// [`CommandResponse::NotImplemented`] outcome regardless of
    /// session state.
    pub async fn dispatch(&self, request: &CommandRequest) -> CommandResponse {
        let Some(command) = Command::parse(&request.method) else {
            return CommandResponse::NotImplemented {
                method: request.method.clone(),
            };
        };

        let args = Args::new(&request.args);
        match self.run(command, args).await {
            Ok(value) => CommandResponse::Ok { result: value },
            Err(err) => err.into(),
        }
    }

    async fn run(&self, command: Command, args: Args<'_>) -> BridgeResult<ResponseValue> {
        match command {
            Command::GetPlatformVersion => Ok(platform_version().into()),
            Command::Open => {
                self.open().await?;
                Ok(true.into())
            }
            Command::BeginPrint => {
                self.begin_print(None).await?;
                Ok(true.into())
            }
            Command::PrintTest => {
                self.begin_print(Some(test_ticket())).await?;
                Ok(true.into())
            }
            _ => self.run_on_session(command, args).await,
        }
    }

    /// `open`: build a fresh driver, open it, install the session.
    ///
    /// A previous session (open, closed, or spent by a print job) is
    /// replaced wholesale.
    async fn open(&self) -> BridgeResult<()> {
        let mut slot = self.session.lock().await;
        let mut driver = (self.factory)();
        driver.open().await?;
        *slot = Some(Session::new(driver));
        Ok(())
    }

    /// Session-dependent commands: liveness guard first, argument
    /// checks second, driver call last. A closed bridge reports
    /// `NOT_OPEN` even when the arguments are also wrong; a bad
    /// argument never reaches the driver.
    async fn run_on_session(&self, command: Command, args: Args<'_>) -> BridgeResult<ResponseValue> {
        let mut slot = self.session.lock().await;
        let session = slot.as_mut().ok_or(BridgeError::NotOpen)?;
        let driver = session.driver_mut();

        let value = match command {
            Command::Close => {
                driver.close();
                true.into()
            }
            Command::Status => i64::from(driver.state()).into(),
            Command::BeforePrinterLength => i64::from(driver.before_printer_length()).into(),
            Command::PrinterLength => i64::from(driver.printer_length()).into(),
            Command::LineWrap => {
                let value = args.int("value")? as i32;
                driver.line_wrap(value);
                true.into()
            }
            Command::SetLineSpace => {
                let line = args.int("line")? as i32;
                driver.set_line_space(line);
                true.into()
            }
            Command::SetPrintFont => {
                driver.set_print_font(args.str("path")?);
                true.into()
            }
            Command::SetPrintGray => {
                let gray = args.int("gray")? as i32;
                driver.set_print_gray(gray);
                true.into()
            }
            Command::AddPrintLine => {
                let line = text_line_from_args(args)?;
                driver.add_print_line(PrintLine::Text(line));
                true.into()
            }
            Command::AddPrintBase64 => {
                let line = bitmap_from_args(args)?;
                driver.add_print_line(line);
                true.into()
            }
            Command::CleanCache => {
                driver.clean_cache();
                true.into()
            }
            Command::GetPlatformVersion
            | Command::Open
            | Command::BeginPrint
            | Command::PrintTest => unreachable!("handled before the session guard"),
        };
        Ok(value)
    }

    /// `beginPrint` / `printTest`: claim the single job slot, then run
    /// the job state machine while holding the session.
    ///
    /// `printTest` enqueues its fixed ticket before the state check
    /// runs.
    async fn begin_print(&self, ticket: Option<[PrintLine; 3]>) -> BridgeResult<()> {
        let _slot = JobSlot::claim(&self.printing).ok_or(BridgeError::JobInProgress)?;

        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(BridgeError::NotOpen)?;
        let driver = session.driver_mut();

        if let Some(lines) = ticket {
            for line in lines {
                driver.add_print_line(line);
            }
        }

        job::run(driver).await
    }
}

/// Platform identifier reported by `getPlatformVersion`.
fn platform_version() -> String {
    format!("{} {}", std::env::consts::OS, std::env::consts::ARCH)
}

/// The fixed test ticket: a centered greeting and two blank lines.
fn test_ticket() -> [PrintLine; 3] {
    [
        PrintLine::Text(TextLine::new("HOLA SISTEPAR")),
        PrintLine::Text(TextLine::default()),
        PrintLine::Text(TextLine::default()),
    ]
}

fn text_line_from_args(args: Args<'_>) -> BridgeResult<TextLine> {
    Ok(TextLine {
        content: args.str("content")?.to_string(),
        position: position_arg(args)?,
        size: match args.opt_int("size")? {
            Some(value) => FontSize::from_wire(value)?,
            None => FontSize::default(),
        },
        bold: args.flag("bold")?,
        italic: args.flag("italic")?,
        invert: args.flag("invert")?,
    })
}

fn bitmap_from_args(args: Args<'_>) -> BridgeResult<PrintLine> {
    let encoded = args.str("encodedString")?;
    let position = position_arg(args)?;

    let bytes = BASE64_STANDARD
        .decode(base64_payload(encoded))
        .map_err(|e| BridgeError::InvalidArgument {
            name: "encodedString",
            message: format!("base64 decode failed: {}", e),
        })?;
    let image = image::load_from_memory(&bytes).map_err(|e| BridgeError::InvalidArgument {
        name: "encodedString",
        message: format!("image decode failed: {}", e),
    })?;

    Ok(PrintLine::Bitmap { image, position })
}

fn position_arg(args: Args<'_>) -> BridgeResult<Position> {
    match args.opt_int("position")? {
        Some(value) => Position::from_wire(value),
        None => Ok(Position::default()),
    }
}

/// Extract the pure base64 payload from a data-URI-style string.
///
/// The payload is everything after the first comma. Without a comma
/// the whole string is used: the index-of-comma-plus-one fallback of
/// the channel contract, kept as documented behavior.
fn base64_payload(encoded: &str) -> &str {
    match encoded.find(',') {
        Some(idx) => &encoded[idx + 1..],
        None => encoded,
    }
}
