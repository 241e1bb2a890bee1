/// 交互模式 (REPL)
///
/// Line-oriented command loop over any `BufRead` / `Write` pair, so the
/// same code drives stdin/stdout and in-memory buffers in tests.
///
/// ```text
/// add <id> <price> <qty> <side>   side: 0|1|buy|sell
/// cancel <id>
/// get <id>
/// snapshot | stats | metrics | clear | help | quit | exit
/// ```

use crate::application::OrderService;
use crate::domain::{Record, Side};
use crate::infrastructure::ReportFormat;
use crate::shared::{AppResult, METRICS};
use std::io::{BufRead, Write};

const HELP: &str = "Commands: add, cancel, get, snapshot, stats, metrics, clear, quit";
const ADD_USAGE: &str = "Usage: add <id> <price> <qty> <side>";
const CANCEL_USAGE: &str = "Usage: cancel <id>";
const GET_USAGE: &str = "Usage: get <id>";

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Repl<'a> {
    service: &'a mut OrderService,
    format: ReportFormat,
}

impl<'a> Repl<'a> {
    pub fn new(service: &'a mut OrderService, format: ReportFormat) -> Self {
        Repl { service, format }
    }

    /// Runs until `quit`, `exit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> AppResult<()> {
        writeln!(out, "Interactive Mode - Type 'help' for commands")?;

        // 按字节读取，非UTF-8输入按普通未知命令处理
        let mut input = input;
        let mut buf = Vec::new();
        loop {
            write!(out, "\n> ")?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);

            if self.execute(line.trim(), out)? == Flow::Quit {
                break;
            }
        }

        tracing::debug!("interactive session ended");
        Ok(())
    }

    fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> AppResult<Flow> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Ok(Flow::Continue);
        };
        let args: Vec<&str> = parts.collect();

        match command {
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => writeln!(out, "{}", HELP)?,
            "snapshot" => self.service.write_snapshot(out, self.format)?,
            "stats" => self.service.write_stats(out, self.format)?,
            "metrics" => write!(out, "{}", METRICS.export())?,
            "clear" => {
                self.service.clear();
                writeln!(out, "All orders cleared.")?;
            }
            "add" => match parse_add(&args) {
                Some(record) => {
                    if self.service.add(record) {
                        writeln!(out, "Order added successfully.")?;
                    } else {
                        writeln!(out, "Failed to add order (ID already exists).")?;
                    }
                }
                None => writeln!(out, "{}", ADD_USAGE)?,
            },
            "cancel" => match parse_id(&args) {
                Some(id) => {
                    if self.service.cancel(id) {
                        writeln!(out, "Order cancelled successfully.")?;
                    } else {
                        writeln!(out, "Order not found.")?;
                    }
                }
                None => writeln!(out, "{}", CANCEL_USAGE)?,
            },
            "get" => match parse_id(&args) {
                Some(id) => match self.service.get(id) {
                    Some(record) => writeln!(out, "{}", record)?,
                    None => writeln!(out, "Order not found.")?,
                },
                None => writeln!(out, "{}", GET_USAGE)?,
            },
            _ => writeln!(out, "Unknown command. Type 'help' for available commands.")?,
        }

        Ok(Flow::Continue)
    }
}

fn parse_add(args: &[&str]) -> Option<Record> {
    let [id, price, qty, side] = args else {
        return None;
    };
    Some(Record::new(
        id.parse().ok()?,
        price.parse().ok()?,
        qty.parse().ok()?,
        side.parse::<Side>().ok()?,
    ))
}

fn parse_id(args: &[&str]) -> Option<u64> {
    match args {
        [id] => id.parse().ok(),
        _ => None,
    }
}
