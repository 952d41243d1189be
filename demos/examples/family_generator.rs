// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Procedural families driven through a headless host loop.
//!
//! This example shows how a host owns the data and the renderer owns the
//! picture:
//! - a seeded generator builds a multi-generation family,
//! - the host renders it, forwards input, and ticks at 60 Hz,
//! - events come back and the host answers with new trees and flags.
//!
//! Run:
//! - `cargo run -p kinship_demos --example family_generator`
//! - `RUST_LOG=kinship_tree=debug cargo run -p kinship_demos --example family_generator -- 7 42`
//!
//! Pass `--help` for the options.

use std::time::Duration;

use clap::Parser;
use kinship_layout::{Person, PersonId, Spouse};
use kinship_tree::{
    Avatar, AvatarResolver, History, IconHandle, IconName, ImageHandle, NodeFlags, RenderFlags,
    RendererConfig, Scene, ToolbarAction, TreeEvent, TreeRenderer,
};
use kurbo::{Point, Size};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Generate a family and drive the renderer through a scripted session.
#[derive(Parser, Debug)]
struct Args {
    /// Number of generations to generate.
    #[arg(default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..=12))]
    generations: u16,

    /// Seed for the family generator.
    #[arg(default_value_t = 7)]
    seed: u64,
}

const FRAME: Duration = Duration::from_micros(16_667);
const SIZE: Size = Size::new(1280.0, 800.0);

const GIVEN: [&str; 12] = [
    "Ada", "Ben", "Cleo", "Dov", "Esme", "Farid", "Greta", "Hugo", "Iris", "Jonah", "Kaia", "Leon",
];
const FAMILY: [&str; 4] = ["Marsh", "Okafor", "Lindqvist", "Tan"];

/// xorshift64*: small, deterministic, good enough for shapes and names.
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    fn next(&mut self) -> u64 {
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        self.0.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Index is below the slice length."
        )]
        let i = self.below(items.len() as u64) as usize;
        items[i]
    }
}

struct Generator {
    rng: Rng,
    next_id: usize,
}

impl Generator {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }

    fn person(&mut self, surname: &str, year: u64) -> Person {
        let id = self.id("p");
        let name = format!("{} {surname}", self.rng.pick(&GIVEN));
        let mut person = Person::new(id.as_str(), name).with_birth_date(format!("{year}-03-14"));
        // Some portraits are missing or broken on purpose.
        match self.rng.below(4) {
            0 => {}
            1 => person = person.with_avatar(format!("broken://{id}")),
            _ => person = person.with_avatar(format!("img://{id}")),
        }
        person
    }

    fn family(&mut self, generations: usize, depth: usize, surname: &str, year: u64) -> Person {
        let mut person = self.person(surname, year);
        if self.rng.below(3) > 0 {
            let id = self.id("s");
            let family = self.rng.pick(&FAMILY);
            let mut spouse = Spouse::new(id.as_str(), format!("{} {family}", self.rng.pick(&GIVEN)));
            spouse.birth_date = Some(format!("{}-07-01", year + self.rng.below(5)));
            person = person.with_spouse(spouse);
        }
        if depth + 1 < generations {
            let children = self.rng.below(4);
            for k in 0..children {
                let child = self.family(generations, depth + 1, surname, year + 24 + k * 2);
                person.children.push(child);
            }
        }
        person
    }
}

/// The host: owns the tree and the flags, and answers renderer events.
struct Host {
    tree: Person,
    flags: RenderFlags,
    history: Vec<Person>,
    future: Vec<Person>,
}

impl Host {
    fn history(&self) -> History {
        History::new(!self.history.is_empty(), !self.future.is_empty())
    }

    fn render(&self, renderer: &mut TreeRenderer<impl AvatarResolver>) {
        if let Err(err) = renderer.render(self.tree.clone(), self.flags.clone(), self.history()) {
            tracing::error!(%err, "tree rejected");
        }
    }

    fn handle(&mut self, renderer: &mut TreeRenderer<impl AvatarResolver>) {
        let events = renderer.take_events();
        if events.is_empty() {
            return;
        }
        for event in events {
            println!("  event: {event:?}");
            match event {
                TreeEvent::ToggleEditMode => {
                    self.flags.edit_mode = !self.flags.edit_mode;
                    if !self.flags.edit_mode {
                        self.flags.edit_target = None;
                    }
                }
                TreeEvent::SetEditTarget(target) => self.flags.edit_target = target,
                TreeEvent::Interacted => self.flags.focused = None,
                TreeEvent::OverlayDismissed => self.flags.header_overlay_active = false,
                TreeEvent::AddRelationship(Some(parent)) => self.add_child(&parent),
                TreeEvent::Undo => {
                    if let Some(previous) = self.history.pop() {
                        self.future
                            .push(std::mem::replace(&mut self.tree, previous));
                    }
                }
                TreeEvent::Redo => {
                    if let Some(next) = self.future.pop() {
                        self.history.push(std::mem::replace(&mut self.tree, next));
                    }
                }
                _ => {}
            }
        }
        self.render(renderer);
    }

    fn add_child(&mut self, parent: &PersonId) {
        fn find<'a>(person: &'a mut Person, id: &str) -> Option<&'a mut Person> {
            if person.id.as_str() == id {
                return Some(person);
            }
            person.children.iter_mut().find_map(|c| find(c, id))
        }
        let before = self.tree.clone();
        let count = headcount(&before);
        if let Some(person) = find(&mut self.tree, parent.as_str()) {
            let child = Person::new(format!("new{count}"), "Newborn").with_birth_date("2025-01-01");
            person.children.push(child);
            self.history.push(before);
            self.future.clear();
        }
    }
}

fn headcount(person: &Person) -> usize {
    let mut n = 0;
    person.walk(|_, _| n += 1);
    n
}

fn run_frames(renderer: &mut TreeRenderer<impl AvatarResolver>, host: &mut Host, frames: usize) {
    for _ in 0..frames {
        renderer.tick(FRAME);
        host.handle(renderer);
        if !renderer.is_animating() {
            break;
        }
    }
}

fn summarize(label: &str, scene: &Scene) {
    let exiting = scene
        .nodes
        .iter()
        .filter(|n| n.flags.contains(NodeFlags::EXITING))
        .count();
    let collapsed = scene
        .nodes
        .iter()
        .filter(|n| n.flags.contains(NodeFlags::COLLAPSED))
        .count();
    let placeholders = scene
        .nodes
        .iter()
        .flat_map(|n| std::iter::once(&n.person).chain(n.spouse.as_ref()))
        .filter(|c| c.content.avatar == Avatar::Placeholder)
        .count();
    println!(
        "{label}: {} nodes ({exiting} exiting, {collapsed} collapsed), {} edges, \
         {placeholders} placeholder avatars, scale {:.3}, edit controls {:.2}",
        scene.nodes.len(),
        scene.edges.len(),
        scene.transform.scale,
        scene.decorations.opacity,
    );
    for node in scene.nodes.iter().take(6) {
        let spouse = node
            .spouse
            .as_ref()
            .map(|s| format!(" + {}", s.content.name))
            .unwrap_or_default();
        println!(
            "    {:>6} {:<18}{:<22} ({:>8.1}, {:>6.1}) {:?}",
            node.id.as_str(),
            node.person.content.name,
            spouse,
            node.position.x,
            node.position.y,
            node.flags
        );
    }
}

fn deepest(person: &Person) -> PersonId {
    let mut best = (0, person.id.clone());
    person.walk(|p, depth| {
        if depth > best.0 {
            best = (depth, p.id.clone());
        }
    });
    best.1
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Args { generations, seed } = Args::parse();
    let generations = usize::from(generations);

    let mut generator = Generator {
        rng: Rng::new(seed),
        next_id: 0,
    };
    let surname = generator.rng.pick(&FAMILY);
    let tree = generator.family(generations, 0, surname, 1900);
    println!(
        "generated {} people over {generations} generations (seed {seed})",
        headcount(&tree)
    );

    // Hosts resolve icons and images to their own handles.
    let icons = |name: IconName| (name != IconName::Share2).then_some(IconHandle(name as u32));
    let avatars = |reference: &str| {
        reference
            .strip_prefix("img://")
            .map(|id| ImageHandle(id.len() as u64))
    };
    let mut renderer = TreeRenderer::with_resources(RendererConfig::default(), &icons, avatars);
    let mut host = Host {
        tree,
        flags: RenderFlags::default(),
        history: Vec::new(),
        future: Vec::new(),
    };

    // The first render waits for a size.
    host.render(&mut renderer);
    summarize("before resize", &renderer.scene());
    renderer.resize(SIZE);
    run_frames(&mut renderer, &mut host, 120);
    summarize("mounted", &renderer.scene());

    // Focus the deepest person: reveal, then center.
    let target = deepest(&host.tree);
    host.flags.focused = Some(target.clone());
    host.render(&mut renderer);
    println!("focus {target}: {:?}", renderer.focus_phase());
    run_frames(&mut renderer, &mut host, 200);
    let at = renderer
        .layout()
        .position(target.as_str())
        .map(|p| renderer.viewport().world_to_screen(p));
    println!("focus done: {target} on screen at {at:?}");
    summarize("focused", &renderer.scene());

    // Drag the canvas: the host hears about it and clears the focus.
    renderer.pointer_down(Point::new(200.0, 700.0));
    renderer.pointer_move(Point::new(260.0, 650.0));
    renderer.pointer_up(Point::new(260.0, 650.0));
    host.handle(&mut renderer);

    // Edit mode from the toolbar, pick a target, add a child, undo it.
    renderer.command(ToolbarAction::ToggleEditMode);
    host.handle(&mut renderer);
    let root = renderer.scene().node(host.tree.id.as_str()).map(|n| n.position);
    if let Some(root) = root {
        let at = renderer.viewport().world_to_screen(root);
        renderer.pointer_down(at);
        renderer.pointer_up(at);
        host.handle(&mut renderer);
    }
    renderer.command(ToolbarAction::Add);
    host.handle(&mut renderer);
    run_frames(&mut renderer, &mut host, 120);
    summarize("after add", &renderer.scene());
    renderer.command(ToolbarAction::Undo);
    host.handle(&mut renderer);
    run_frames(&mut renderer, &mut host, 120);
    summarize("after undo", &renderer.scene());

    // Collapse everything under the root and watch it drain.
    renderer.toggle(host.tree.id.as_str());
    summarize("collapsing", &renderer.scene());
    run_frames(&mut renderer, &mut host, 120);
    summarize("collapsed", &renderer.scene());

    renderer.command(ToolbarAction::ZoomReset);
    run_frames(&mut renderer, &mut host, 60);
    println!("reset: {:?}", renderer.viewport().transform());
}
