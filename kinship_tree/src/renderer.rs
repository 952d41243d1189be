// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tree renderer component.

use alloc::vec::Vec;
use core::time::Duration;

use kinship_layout::{
    CollapseState, Layout, LayoutEngine, LayoutError, Person, PersonId, Snapshot, Toggle,
    ToggleOutcome,
};
use kinship_view2d::Viewport;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Size};

use crate::config::RendererConfig;
use crate::decorations::EditDecorations;
use crate::events::TreeEvent;
use crate::flags::{History, RenderFlags};
use crate::focus::{FocusPhase, FocusSequencer};
use crate::geometry::{NodeShapes, elbow};
use crate::gesture::{PointerMove, PointerTracker, Release};
use crate::hit::{Hit, HitTarget};
use crate::overlay::Overlay;
use crate::reconcile::Diff;
use crate::resources::{AvatarResolver, IconName, IconResolver, IconSet, NoAvatars, NoIcons};
use crate::scene::{CardItem, DecorationStyle, EdgeItem, NodeFlags, NodeItem, Scene};
use crate::stage::{NodeSprite, Stage};
use crate::toolbar::{Toolbar, ToolbarAction};

/// What a layout request did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The viewport has no area yet; the layout will run on the next
    /// positive [`TreeRenderer::resize`].
    Deferred,
    /// A new layout was computed and its transitions started.
    Updated(Diff),
}

impl RenderOutcome {
    /// The diff, if a layout ran.
    pub fn diff(&self) -> Option<&Diff> {
        match self {
            Self::Deferred => None,
            Self::Updated(diff) => Some(diff),
        }
    }
}

/// Interactive family tree renderer.
///
/// The owner drives it with [`render`](Self::render) whenever its tree or
/// flags change, forwards viewport size, pointer and wheel input, and calls
/// [`tick`](Self::tick) once per frame. It draws [`scene`](Self::scene) and
/// reacts to the [`TreeEvent`]s drained with
/// [`take_events`](Self::take_events). The renderer never edits the tree;
/// every change request comes back to the owner as an event.
///
/// Collapse choices are remembered per identifier across renders. The first
/// time a node is seen, nothing deeper than
/// [`LayoutConfig::default_expanded_depth`] is shown.
///
/// [`LayoutConfig::default_expanded_depth`]: kinship_layout::LayoutConfig::default_expanded_depth
#[derive(Debug)]
pub struct TreeRenderer<A = NoAvatars> {
    config: RendererConfig,
    engine: LayoutEngine,
    collapse: CollapseState,
    snapshot: Option<Snapshot>,
    layout: Layout,
    /// A layout was requested while the viewport had no area.
    pending: bool,
    stage: Stage,
    viewport: Viewport,
    focus: FocusSequencer,
    decorations: EditDecorations,
    overlay: Overlay,
    pointer: PointerTracker<Hit>,
    toolbar: Toolbar,
    icons: IconSet,
    avatars: A,
    flags: RenderFlags,
    history: History,
    events: Vec<TreeEvent>,
}

impl Default for TreeRenderer {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

impl TreeRenderer {
    /// A renderer without icons or avatar images.
    pub fn new(config: RendererConfig) -> Self {
        Self::with_resources(config, &NoIcons, NoAvatars)
    }
}

impl<A: AvatarResolver> TreeRenderer<A> {
    /// A renderer drawing icons from `icons` and avatars from `avatars`.
    ///
    /// Icons are resolved once, here.
    pub fn with_resources(config: RendererConfig, icons: &impl IconResolver, avatars: A) -> Self {
        let icons = IconSet::resolve(icons);
        let flags = RenderFlags::default();
        let toolbar = Toolbar::build(Size::ZERO, false, History::empty(), false, &icons);
        Self {
            engine: LayoutEngine::new(config.layout.clone()),
            collapse: CollapseState::new(config.layout.default_expanded_depth),
            snapshot: None,
            layout: Layout::default(),
            pending: false,
            stage: Stage::default(),
            viewport: Viewport::new(config.viewport.clone()),
            focus: FocusSequencer::default(),
            decorations: EditDecorations::new(flags.edit_mode),
            overlay: Overlay::default(),
            pointer: PointerTracker::new(config.click_slop),
            toolbar,
            icons,
            avatars,
            flags,
            history: History::empty(),
            events: Vec::new(),
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Accept a new tree and flags from the owner.
    ///
    /// Fails with [`LayoutError`] if the tree has duplicate or empty
    /// identifiers; nothing changes in that case. When the focused node
    /// changes to a new identifier, a [focus](Self::focus) follows the
    /// layout; the returned diff is the one for the tree itself.
    pub fn render(
        &mut self,
        tree: Person,
        flags: RenderFlags,
        history: History,
    ) -> Result<RenderOutcome, LayoutError> {
        let snapshot = Snapshot::new(tree)?;
        self.collapse.observe(snapshot.root());
        self.snapshot = Some(snapshot);

        let refocus = flags.focused.is_some() && flags.focused != self.flags.focused;
        self.decorations
            .set_enabled(flags.edit_mode, self.config.transition);
        self.overlay.sync(flags.header_overlay_active);
        self.flags = flags;
        self.history = history;
        self.rebuild_toolbar();

        let outcome = self.relayout();
        if refocus && let Some(id) = self.flags.focused.clone() {
            self.focus(id.as_str());
        }
        Ok(outcome)
    }

    /// Update the viewport size.
    ///
    /// Returns the diff of a layout that was waiting for a positive size.
    pub fn resize(&mut self, size: Size) -> Option<Diff> {
        let has_area = self.viewport.set_size(size);
        self.rebuild_toolbar();
        if !(has_area && self.pending) {
            return None;
        }
        match self.relayout() {
            RenderOutcome::Updated(diff) => Some(diff),
            RenderOutcome::Deferred => None,
        }
    }

    /// Flip the collapse state of node `id` and lay out again.
    pub fn toggle(&mut self, id: &str) -> ToggleOutcome {
        let Some(person) = self.snapshot.as_ref().and_then(|s| s.person(id)) else {
            return ToggleOutcome::Ignored;
        };
        let outcome = self.collapse.toggle(person);
        if outcome != ToggleOutcome::Ignored {
            tracing::debug!(id, ?outcome, "toggled");
            self.relayout();
        }
        outcome
    }

    /// Reveal `id` and then center the camera on it.
    ///
    /// Every collapsed ancestor is expanded and the tree is laid out again.
    /// Once the resulting transitions have had time to finish, the camera
    /// moves so the node sits horizontally centered near the top of the
    /// viewport. A spouse identifier focuses its partner's node.
    ///
    /// Unknown identifiers are ignored (returns `false`).
    pub fn focus(&mut self, id: &str) -> bool {
        let Some(snapshot) = self.snapshot.as_ref() else {
            tracing::warn!(id, "focus requested before any tree was rendered");
            return false;
        };
        let index = snapshot.index();
        let Some(node) = index.node_of(id).map(PersonId::new) else {
            tracing::warn!(id, "focus target is not in the tree");
            return false;
        };
        let ancestors = index.ancestors(id);
        if self.collapse.expand_all(&ancestors) > 0 {
            self.relayout();
        }
        self.focus.begin(node, self.config.transition);
        true
    }

    /// Advance every animation by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.stage.tick(dt);
        self.decorations.tick(dt);
        match self.viewport.tick(dt) {
            Some(motion) if motion.is_user() => self.events.push(TreeEvent::Interacted),
            Some(_) => self.focus.finish(),
            None => {}
        }
        if let Some(target) = self.focus.tick(dt) {
            let centered = self
                .layout
                .position(target.as_str())
                .is_some_and(|at| self.viewport.center_on(at));
            if !centered {
                tracing::debug!(target = target.as_str(), "focus target not placed; giving up");
                self.focus.cancel();
            }
        }
    }

    /// Returns `true` while anything is still moving or a focus is pending.
    pub fn is_animating(&self) -> bool {
        !self.stage.is_settled()
            || !self.decorations.is_settled()
            || self.viewport.motion().is_some()
            || self.focus.is_active()
    }

    /// A pointer went down at the screen point `at`.
    ///
    /// While the header overlay is open the press only dismisses it.
    pub fn pointer_down(&mut self, at: Point) {
        if self.overlay.outside_interaction() {
            self.pointer.cancel();
            self.rebuild_toolbar();
            self.events.push(TreeEvent::OverlayDismissed);
            return;
        }
        let hit = self.scene().hit(at);
        self.pointer.on_down(hit, at);
    }

    /// The pointer moved to the screen point `at`.
    pub fn pointer_move(&mut self, at: Point) {
        let PointerMove::Pan { delta, started } = self.pointer.on_move(at) else {
            return;
        };
        if started && !self.viewport.begin_gesture() {
            // The camera is busy; this press is spent.
            self.pointer.cancel();
            return;
        }
        self.viewport.pan_by(delta);
    }

    /// The pointer was released at the screen point `at`.
    pub fn pointer_up(&mut self, at: Point) {
        match self.pointer.on_up(at) {
            Release::Click(hit) => self.activate(hit),
            Release::PanEnd => {
                if self.viewport.end_gesture() {
                    self.events.push(TreeEvent::Interacted);
                }
            }
            Release::Nothing => {}
        }
    }

    /// The pointer capture was lost; drop the press.
    pub fn pointer_cancel(&mut self) {
        if self.pointer.is_panning() && self.viewport.end_gesture() {
            self.events.push(TreeEvent::Interacted);
        }
        self.pointer.cancel();
    }

    /// Zoom by `zoom_step^(-delta)` about the screen point `at`.
    ///
    /// Positive `delta` (scrolling down) zooms out. Returns `false` if the
    /// camera is busy with a programmatic move.
    pub fn wheel(&mut self, delta: f64, at: Point) -> bool {
        if !delta.is_finite() || delta == 0.0 {
            return false;
        }
        let factor = self.config.viewport.zoom_step.powf(-delta);
        if self.viewport.is_gesturing() {
            // Part of a pan in progress; it reports on release.
            return self.viewport.zoom_at(factor, at);
        }
        if !self.viewport.begin_gesture() {
            return false;
        }
        self.viewport.zoom_at(factor, at);
        if self.viewport.end_gesture() {
            self.events.push(TreeEvent::Interacted);
        }
        true
    }

    /// Run a toolbar command, as if its button was clicked.
    ///
    /// Commands whose button is hidden or disabled do nothing. Returns
    /// `true` if the command had an effect.
    pub fn command(&mut self, action: ToolbarAction) -> bool {
        if !self.toolbar.button(action).is_some_and(|b| b.enabled) {
            return false;
        }
        let event = match action {
            ToolbarAction::Undo => TreeEvent::Undo,
            ToolbarAction::Redo => TreeEvent::Redo,
            ToolbarAction::Add => TreeEvent::AddRelationship(self.flags.edit_target.clone()),
            ToolbarAction::ToggleEditMode => TreeEvent::ToggleEditMode,
            ToolbarAction::Share => TreeEvent::Share,
            ToolbarAction::ZoomIn => return self.viewport.zoom_in(),
            ToolbarAction::ZoomOut => return self.viewport.zoom_out(),
            ToolbarAction::ZoomReset => return self.viewport.reset(),
        };
        self.events.push(event);
        true
    }

    /// Drain the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<TreeEvent> {
        core::mem::take(&mut self.events)
    }

    /// Build the display list for the current frame.
    pub fn scene(&self) -> Scene {
        let mut nodes = Vec::with_capacity(self.stage.len());
        for node in self.layout.nodes() {
            if let Some(sprite) = self.stage.get(node.id.as_str()) {
                nodes.push(self.node_item(&node.id, sprite));
            }
        }
        for (id, sprite) in self.stage.exiting() {
            nodes.push(self.node_item(id, sprite));
        }

        // An entering edge starts with both ends at the enter origin and an
        // exiting one shrinks with its child, so edges simply follow sprites.
        let edges = nodes
            .iter()
            .filter_map(|n| {
                let parent = self.stage.get(n.id.as_str())?.parent.as_ref()?;
                let from = self.stage.visual_position(parent.as_str())?;
                Some(EdgeItem {
                    target: n.id.clone(),
                    path: elbow(from, n.position, &self.config),
                })
            })
            .collect();

        Scene {
            transform: self.viewport.transform(),
            edges,
            nodes,
            decorations: DecorationStyle {
                opacity: self.decorations.opacity(),
                interactive: self.decorations.is_enabled(),
                edit_icon: self.icons.get(IconName::Pencil),
                delete_icon: self.icons.get(IconName::Trash2),
            },
            toolbar: self.toolbar.clone(),
        }
    }

    /// The current logical layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The current snapshot, once a tree has been rendered.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// The camera.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Collapse memory.
    pub fn collapse_state(&self) -> &CollapseState {
        &self.collapse
    }

    /// Flags as of the last render, plus local edit-target changes.
    pub fn flags(&self) -> &RenderFlags {
        &self.flags
    }

    /// Where a focus request is.
    pub fn focus_phase(&self) -> &FocusPhase {
        self.focus.phase()
    }

    /// Header overlay state.
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// The control bars.
    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    /// On-screen position of node `id` right now.
    pub fn visual_position(&self, id: &str) -> Option<Point> {
        self.stage.visual_position(id)
    }

    fn relayout(&mut self) -> RenderOutcome {
        let Some(snapshot) = self.snapshot.as_ref() else {
            return RenderOutcome::Deferred;
        };
        if !self.viewport.has_area() {
            tracing::debug!("viewport has no area; layout deferred");
            self.pending = true;
            return RenderOutcome::Deferred;
        }
        self.pending = false;

        let collapse = &self.collapse;
        let next = self
            .engine
            .layout(snapshot, |id| collapse.is_collapsed(id.as_str()));
        let diff = Diff::between(&self.layout, &next);
        self.stage.apply(
            &diff,
            &self.layout,
            &next,
            snapshot,
            &self.avatars,
            self.config.transition,
        );
        self.layout = next;
        tracing::debug!(
            visible = self.layout.len(),
            collapsed = self.collapse.collapsed_count(),
            "relayout"
        );
        RenderOutcome::Updated(diff)
    }

    fn rebuild_toolbar(&mut self) {
        self.toolbar = Toolbar::build(
            self.viewport.size(),
            self.flags.edit_mode,
            self.history,
            self.overlay.is_open(),
            &self.icons,
        );
    }

    fn activate(&mut self, hit: Hit) {
        match hit {
            Hit::Toolbar(action) => {
                self.command(action);
            }
            Hit::Node(target) => self.activate_node(target),
        }
    }

    fn activate_node(&mut self, target: HitTarget) {
        let event = match target {
            HitTarget::Card(id) | HitTarget::SpouseCard(id) => {
                self.click_body(id);
                return;
            }
            HitTarget::Toggle(id) => {
                self.toggle(id.as_str());
                return;
            }
            HitTarget::EditNode(id) => TreeEvent::EditNode(id),
            HitTarget::DeleteNode(id) => TreeEvent::DeleteNode(id),
            HitTarget::EditSpouse(id) => TreeEvent::EditSpouse(id),
            HitTarget::DeleteSpouse(id) => TreeEvent::DeleteSpouse(id),
        };
        self.events.push(event);
    }

    fn click_body(&mut self, id: PersonId) {
        if self.flags.edit_mode {
            let next = (self.flags.edit_target.as_ref() != Some(&id)).then_some(id);
            self.flags.edit_target.clone_from(&next);
            self.events.push(TreeEvent::SetEditTarget(next));
        } else if self
            .layout
            .get(id.as_str())
            .is_some_and(|n| n.toggle == Toggle::Hidden)
        {
            self.events.push(TreeEvent::NodeClicked(id));
        }
    }

    fn node_item(&self, id: &PersonId, sprite: &NodeSprite) -> NodeItem {
        let position = sprite.position.value();
        let content = &sprite.content;
        let has_spouse = content.spouse.is_some();
        let shapes = NodeShapes::new(position, has_spouse, &self.config);

        let mut flags = NodeFlags::from_toggle(content.toggle);
        flags.set(NodeFlags::HAS_SPOUSE, has_spouse);
        flags.set(NodeFlags::HIGHLIGHTED, self.flags.is_highlighted(id.as_str()));
        flags.set(NodeFlags::EXITING, sprite.exiting);
        flags.set(
            NodeFlags::CLICKABLE,
            !sprite.exiting && (self.flags.edit_mode || content.toggle == Toggle::Hidden),
        );

        let couple_link = shapes.couple_link();
        NodeItem {
            id: id.clone(),
            position,
            presence: sprite.presence.value(),
            flags,
            person: CardItem {
                content: content.person.clone(),
                shapes: shapes.person,
            },
            spouse: content
                .spouse
                .clone()
                .zip(shapes.spouse)
                .map(|(content, shapes)| CardItem { content, shapes }),
            couple_link,
            toggle: content.toggle.is_visible().then_some(shapes.toggle),
            hidden: self.collapse.hidden_children(id.as_str()).len(),
        }
    }
}
