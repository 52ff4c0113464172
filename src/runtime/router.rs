use std::collections::HashMap;

use super::screens::{OutputChannel, ScreenId};

/// Well-known message tags emitted by the workbench and its workers.
pub mod tags {
    pub const REFRESH_REQUEST: &str = "refresh-request";
    pub const SOLVER_PROGRESS: &str = "solver-progress";
    pub const STRUCTURAL_PROGRESS: &str = "structural-analysis-progress";
    pub const COUPLED_PROGRESS: &str = "coupled-analysis-progress";
    pub const MESH_PROGRESS: &str = "mesh-generation-progress";
    pub const INTERSECTION_PROGRESS: &str = "intersection-progress";
    pub const ERROR: &str = "error";
    pub const COLLISION_CHECK: &str = "selection-collision-check";
}

/// Immutable notification value: a tag plus ordered text lines. Consumed
/// synchronously by dispatch; nothing holds one after routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub tag: String,
    pub lines: Vec<String>,
}

impl Message {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            lines: Vec::new(),
        }
    }

    pub fn with_lines<I, S>(tag: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tag: tag.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// One subscriber action taken when a tag matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Arm the update scheduler.
    RequestUpdate,
    /// Append every message line, in order, to a screen console.
    Console {
        screen: ScreenId,
        channel: OutputChannel,
    },
    /// Present a modal alert with the first line.
    Alert,
    /// Read the held-modifier state and set the model's collision flag.
    CollisionProbe,
}

/// Tag-keyed dispatch table. Built once at startup; `subscribe` lets hosts
/// extend it. Unknown tags resolve to no routes — by design, so producers
/// can introduce tags before every consumer understands them.
pub struct MessageRouter {
    routes: HashMap<String, Vec<Route>>,
}

impl MessageRouter {
    pub fn empty() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// The workbench's standing routing table.
    pub fn with_default_routes() -> Self {
        let mut router = Self::empty();
        router.subscribe(tags::REFRESH_REQUEST, Route::RequestUpdate);
        router.subscribe(
            tags::SOLVER_PROGRESS,
            Route::Console {
                screen: ScreenId::Solver,
                channel: OutputChannel::Solver,
            },
        );
        router.subscribe(
            tags::SOLVER_PROGRESS,
            Route::Console {
                screen: ScreenId::Coupled,
                channel: OutputChannel::Primary,
            },
        );
        router.subscribe(
            tags::STRUCTURAL_PROGRESS,
            Route::Console {
                screen: ScreenId::Structure,
                channel: OutputChannel::Primary,
            },
        );
        router.subscribe(
            tags::STRUCTURAL_PROGRESS,
            Route::Console {
                screen: ScreenId::Coupled,
                channel: OutputChannel::Primary,
            },
        );
        router.subscribe(
            tags::STRUCTURAL_PROGRESS,
            Route::Console {
                screen: ScreenId::Assembly,
                channel: OutputChannel::Primary,
            },
        );
        router.subscribe(
            tags::COUPLED_PROGRESS,
            Route::Console {
                screen: ScreenId::Coupled,
                channel: OutputChannel::Primary,
            },
        );
        router.subscribe(
            tags::MESH_PROGRESS,
            Route::Console {
                screen: ScreenId::Mesh,
                channel: OutputChannel::Primary,
            },
        );
        router.subscribe(
            tags::INTERSECTION_PROGRESS,
            Route::Console {
                screen: ScreenId::Intersection,
                channel: OutputChannel::Primary,
            },
        );
        router.subscribe(tags::ERROR, Route::Alert);
        router.subscribe(tags::COLLISION_CHECK, Route::CollisionProbe);
        router
    }

    pub fn subscribe(&mut self, tag: impl Into<String>, route: Route) {
        self.routes.entry(tag.into()).or_default().push(route);
    }

    /// Routes for `tag`, empty for unknown tags.
    pub fn routes(&self, tag: &str) -> &[Route] {
        self.routes.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_known(&self, tag: &str) -> bool {
        self.routes.contains_key(tag)
    }
}
