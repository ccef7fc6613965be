//! Scenarios run by the `node-selftest` binary.
//!
//! Each scenario builds its own [`Forest`], exercises one area of the engine,
//! counts passed/failed checks and finally verifies that nothing leaked.

use std::fmt;

use log::warn;
use node_forest_util::Fuzzer;
use thiserror::Error;

use crate::forest::Forest;
use crate::kinds::{IntKind, TextKind};
use crate::ring::Ring;
use crate::tree;
use crate::types::{NodeId, Order};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} expects a value")]
    MissingValue(&'static str),
    #[error("invalid value {value:?} for {flag}")]
    InvalidValue { flag: &'static str, value: String },
    #[error("unknown argument {0:?}")]
    UnknownArgument(String),
}

/// Command-line settings of the self-test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfTestConfig {
    /// How many times the whole scenario list runs.
    pub rounds: usize,
    /// Items pushed/inserted per scenario.
    pub items: usize,
    /// Fuzzer seed; random when absent.
    pub seed: Option<u64>,
    /// Suppress per-check failure lines.
    pub quiet: bool,
}

impl Default for SelfTestConfig {
    fn default() -> Self {
        Self {
            rounds: 1,
            items: 100,
            seed: None,
            quiet: false,
        }
    }
}

impl SelfTestConfig {
    /// Parses `--rounds N`, `--items N`, `--seed N|0xHEX` and `--quiet`.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--rounds" => config.rounds = parse_count("--rounds", args.next())?,
                "--items" => config.items = parse_count("--items", args.next())?,
                "--seed" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--seed"))?;
                    config.seed = Some(parse_seed(&value)?);
                }
                "--quiet" | "-q" => config.quiet = true,
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }
        Ok(config)
    }
}

fn parse_count(flag: &'static str, value: Option<String>) -> Result<usize, ConfigError> {
    let value = value.ok_or(ConfigError::MissingValue(flag))?;
    value
        .parse()
        .map_err(|_| ConfigError::InvalidValue { flag, value })
}

fn parse_seed(value: &str) -> Result<u64, ConfigError> {
    let parsed = match value.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|_| ConfigError::InvalidValue {
        flag: "--seed",
        value: value.to_string(),
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Pass rate in whole percent; 100 for an empty tally.
    pub fn rate(&self) -> usize {
        match self.total() {
            0 => 100,
            total => self.passed * 100 / total,
        }
    }

    fn absorb(&mut self, other: Tally) {
        self.passed += other.passed;
        self.failed += other.failed;
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pass/fail:total {}/{}:{}, rate {}%",
            self.passed,
            self.failed,
            self.total(),
            self.rate()
        )
    }
}

#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub tally: Tally,
    pub failures: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SelfTestReport {
    pub seed: u64,
    pub scenarios: Vec<ScenarioReport>,
}

impl SelfTestReport {
    pub fn total(&self) -> Tally {
        let mut all = Tally::default();
        for scenario in &self.scenarios {
            all.absorb(scenario.tally);
        }
        all
    }

    pub fn passed(&self) -> bool {
        self.total().failed == 0
    }
}

struct Checks {
    name: &'static str,
    tally: Tally,
    failures: Vec<String>,
}

impl Checks {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            tally: Tally::default(),
            failures: Vec::new(),
        }
    }

    fn check(&mut self, ok: bool, what: impl fmt::Display) -> bool {
        if ok {
            self.tally.passed += 1;
        } else {
            self.tally.failed += 1;
            warn!("{} fail: {what}", self.name);
            self.failures.push(what.to_string());
        }
        ok
    }

    fn finish(mut self, forest: &Forest) -> ScenarioReport {
        let leaked = forest.node_count();
        self.check(leaked == 0, format_args!("{leaked} nodes leaked"));
        ScenarioReport {
            name: self.name,
            tally: self.tally,
            failures: self.failures,
        }
    }
}

type Scenario = fn(&mut Checks, &mut Forest, &mut Fuzzer, usize);

const SCENARIOS: [(&str, Scenario); 7] = [
    ("basic", basic),
    ("list", list),
    ("stack", stack),
    ("queue", queue),
    ("table", table),
    ("graph", graph),
    ("tree", bst),
];

/// Runs every scenario `config.rounds` times.
pub fn run(config: &SelfTestConfig) -> SelfTestReport {
    let mut fuzzer = Fuzzer::new(config.seed);
    let mut scenarios = Vec::new();
    for _ in 0..config.rounds {
        for (name, scenario) in SCENARIOS {
            let mut checks = Checks::new(name);
            let mut forest = Forest::new();
            scenario(&mut checks, &mut forest, &mut fuzzer, config.items.max(1));
            scenarios.push(checks.finish(&forest));
        }
    }
    SelfTestReport {
        seed: fuzzer.seed(),
        scenarios,
    }
}

fn text_of(forest: &Forest, id: NodeId) -> Option<&str> {
    forest.payload::<TextKind>(id).map(String::as_str)
}

fn basic(checks: &mut Checks, forest: &mut Forest, _: &mut Fuzzer, _: usize) {
    let (Ok(hello), Ok(world)) = (forest.text("Hello"), forest.text("World")) else {
        checks.check(false, "couldn't create text nodes");
        return;
    };
    let Ok(outer) = forest.wrap(hello, true) else {
        checks.check(false, "couldn't wrap a node in a node");
        return;
    };

    checks.check(forest.text("").is_err(), "empty text was accepted");
    checks.check(
        forest.put(hello, 1, world) == Ok(2),
        "couldn't insert node into set",
    );
    checks.check(forest.len(hello) == 2, "node table has wrong length");
    checks.check(
        forest.put(outer, 1, world).is_ok(),
        "couldn't move node into another set",
    );
    checks.check(!forest.has_table(hello), "table was not freed");
    checks.check(
        forest.release(outer, 1) == Some(world),
        "couldn't remove node",
    );
    checks.check(forest.add(hello, world).is_ok(), "couldn't add to list");
    checks.check(
        forest.put(hello, 0, world).is_err(),
        "inserted same item into set",
    );
    checks.check(
        forest.put(hello, 10, world).is_err(),
        "inserted same item at another index",
    );
    checks.check(
        forest.render(world) == Some("World"),
        "text node didn't render as itself",
    );
    checks.check(forest.render(outer).is_none(), "wrapper rendered as text");

    forest.destroy(outer, true);
}

fn list(checks: &mut Checks, forest: &mut Forest, _: &mut Fuzzer, items: usize) {
    let Ok(head) = forest.text("aaa") else {
        checks.check(false, "couldn't create head node");
        return;
    };
    let mut tail = head;
    for i in 0..items {
        let added = forest
            .text("aaa")
            .and_then(|next| forest.add(tail, next).map(|_| next));
        let Ok(next) = added else {
            checks.check(false, format_args!("couldn't add item {i}"));
            break;
        };
        tail = next;
    }

    let mut walked = 0;
    let mut current = head;
    while let Some(next) = forest.child(current, 0) {
        checks.check(
            forest.owner(next) == Some(current),
            format_args!("owner {walked} was not set"),
        );
        checks.check(
            forest.compare(next, current) == Some(std::cmp::Ordering::Equal),
            format_args!("compare {walked} not working"),
        );
        current = next;
        walked += 1;
    }
    checks.check(walked == items, format_args!("walked {walked} of {items}"));

    forest.destroy(head, true);
}

fn stack(checks: &mut Checks, forest: &mut Forest, _: &mut Fuzzer, items: usize) {
    let mut ring = Ring::new();
    let mut pushed = Vec::new();
    for i in 0..items {
        let Ok(value) = forest.int(i as i64) else {
            checks.check(false, format_args!("couldn't create item {i}"));
            continue;
        };
        if checks.check(
            ring.push(forest, value).is_ok(),
            format_args!("couldn't push item {i} onto the stack"),
        ) {
            pushed.push(value);
        }
    }

    while let Some(value) = ring.pop(forest) {
        let expected = pushed.pop();
        checks.check(
            Some(value) == expected,
            format_args!("popped {value} but expected {expected:?}"),
        );
        forest.destroy(value, true);
    }
    checks.check(ring.is_empty() && pushed.is_empty(), "stack shouldn't exist");
}

fn queue(checks: &mut Checks, forest: &mut Forest, fuzzer: &mut Fuzzer, items: usize) {
    let mut ring = Ring::new();
    let mut enqueued = std::collections::VecDeque::new();
    for i in 0..items {
        let Ok(value) = forest.text(&format!("q{i}")) else {
            checks.check(false, format_args!("couldn't create item {i}"));
            continue;
        };
        if checks.check(
            ring.enqueue(forest, value).is_ok(),
            format_args!("couldn't enqueue item {i}"),
        ) {
            enqueued.push_back(value);
        }
        // Interleave some dequeues with the enqueues.
        if fuzzer.random_bool(0.25) {
            if let Some(value) = ring.dequeue(forest) {
                let expected = enqueued.pop_front();
                checks.check(
                    Some(value) == expected,
                    format_args!("early dequeue {value} but expected {expected:?}"),
                );
                forest.destroy(value, true);
            }
        }
    }

    while let Some(value) = ring.dequeue(forest) {
        let expected = enqueued.pop_front();
        checks.check(
            Some(value) == expected,
            format_args!("dequeued {value} but expected {expected:?}"),
        );
        forest.destroy(value, true);
    }
    checks.check(ring.is_empty() && enqueued.is_empty(), "queue shouldn't exist");
}

fn table(checks: &mut Checks, forest: &mut Forest, _: &mut Fuzzer, items: usize) {
    let Ok(owner) = forest.text("Table Test Node") else {
        checks.check(false, "couldn't create test node");
        return;
    };
    for i in 0..items {
        let added = forest
            .text("table test item")
            .and_then(|item| forest.add(owner, item));
        if !checks.check(
            added == Ok(i + 1),
            format_args!("insertion: length is {}, should be {}", forest.len(owner), i + 1),
        ) {
            break;
        }
    }

    while let Some(item) = forest.pop_child(owner) {
        forest.destroy(item, true);
    }
    checks.check(
        forest.len(owner) == 0,
        format_args!("couldn't remove item {}", forest.len(owner)),
    );
    checks.check(!forest.has_table(owner), "table storage still exists");
    checks.check(
        forest.capacity(owner) == 0,
        format_args!("capacity is {}, should be 0", forest.capacity(owner)),
    );

    forest.destroy(owner, true);
}

/// Label `i` of a graph: three consecutive letters starting at `a + i % 26`.
fn graph_label(i: usize) -> String {
    (0..3u8)
        .map(|offset| (b'a' + ((i % 26) as u8 + offset) % 26) as char)
        .collect()
}

fn graph(checks: &mut Checks, forest: &mut Forest, fuzzer: &mut Fuzzer, items: usize) {
    let alphabet = *fuzzer.pick(&["abcdefghijklmnopqrstuvwxyz", "ABCDEFGHIJKLMNOPQRSTUVWXYZ"]);
    let name = fuzzer.random_string(8, alphabet);
    let Ok(graph) = forest
        .text(&name)
        .and_then(|inner| forest.wrap(inner, true))
    else {
        checks.check(false, "couldn't create string graph");
        return;
    };
    for i in 0..items {
        let placed = forest
            .text(&graph_label(i))
            .and_then(|vertex| forest.put(graph, i, vertex));
        checks.check(placed == Ok(i + 1), format_args!("couldn't place vertex {i}"));
    }
    let vertices: Vec<_> = forest.children(graph).collect();
    for (i, vertex) in vertices {
        let label = graph_label(i);
        checks.check(
            forest.render(vertex) == Some(label.as_str()),
            format_args!("vertex {i} lost its label"),
        );
    }
    let named = forest
        .unwrap_node(graph)
        .and_then(|inner| text_of(forest, inner));
    checks.check(named == Some(name.as_str()), "graph lost its name");

    forest.destroy(graph, true);
}

fn bst(checks: &mut Checks, forest: &mut Forest, fuzzer: &mut Fuzzer, items: usize) {
    let values = fuzzer.random_ints(items, -1000, 1000);
    let Ok(root) = forest.int(0) else {
        checks.check(false, "couldn't create root");
        return;
    };
    for value in &values {
        let inserted = forest
            .int(*value)
            .and_then(|node| tree::insert(forest, root, node).map(|w| (node, w)));
        match inserted {
            Ok((node, w)) => {
                checks.check(
                    w == forest.weight(node),
                    format_args!("insert {value} returned weight {w}"),
                );
            }
            Err(err) => {
                checks.check(false, format_args!("insert {value}: {err}"));
            }
        }
    }
    let weight = forest.weight(root);
    checks.check(
        weight == items + 1,
        format_args!("root weight {weight}, expected {}", items + 1),
    );

    let sorted: Vec<i64> = tree::collect(forest, root, Order::In)
        .into_iter()
        .filter_map(|id| forest.payload::<IntKind>(id).copied())
        .collect();
    checks.check(
        sorted.windows(2).all(|w| w[0] <= w[1]),
        "in-order walk is not sorted",
    );
    for order in [Order::Pre, Order::In, Order::Post] {
        let visited = tree::collect(forest, root, order).len();
        checks.check(
            visited == items + 1,
            format_args!("{order:?}-order visited {visited} nodes"),
        );
    }

    if let Ok(probe) = forest.int(values[0]) {
        checks.check(
            tree::find(forest, root, probe).is_some(),
            format_args!("couldn't find {}", values[0]),
        );
        forest.destroy(probe, true);
    }
    if let Ok(stranger) = forest.text("not a number") {
        checks.check(
            tree::insert(forest, root, stranger).is_err(),
            "inserted a text node into an int tree",
        );
        forest.destroy(stranger, true);
    }

    forest.destroy(root, true);
}
