//! Command-driven dispatch: which detector runs and what gets reported.

use serde::{Deserialize, Serialize};

use ballhawk_core::RgbImageView;
use ballhawk_detect::{
    offset, BallDetector, BallParams, ColorId, DistanceFilter, DistanceModel, Palette,
    SafeZoneDetector, TeamColor, ZoneParams,
};
use ballhawk_link::{Command, Report};

/// Colors tried, in order, when free search services a default command.
const FREE_SEARCH_ORDER: [ColorId; 4] = [
    ColorId::Red,
    ColorId::Blue,
    ColorId::Yellow,
    ColorId::Black,
];

/// Dispatcher behavior for commands outside `'1'..='4'`.
///
/// The vehicle starts in `CommandOnly` and switches to `FreeSearch` the
/// first time a safe-zone command is successfully serviced. Competition
/// rule: once the first grab has been delivered to a zone, the default
/// behavior becomes autonomous multi-color ball search. The transition is
/// one-way and fires exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    CommandOnly,
    FreeSearch,
}

/// Tunables for one dispatcher instance.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DispatcherParams {
    pub ball: BallParams,
    pub zone: ZoneParams,
    pub distance: DistanceModel,
    /// Sliding-window size of the distance filter.
    pub smoothing_window: usize,
}

impl Default for DispatcherParams {
    fn default() -> Self {
        Self {
            ball: BallParams::default(),
            zone: ZoneParams::default(),
            distance: DistanceModel::default(),
            smoothing_window: 5,
        }
    }
}

/// Per-cycle state machine: selects the detector for the inbound command and
/// shapes the outbound report.
pub struct Dispatcher {
    palette: Palette,
    balls: BallDetector,
    zones: SafeZoneDetector,
    distance: DistanceModel,
    filter: DistanceFilter,
    mode: SearchMode,
}

impl Dispatcher {
    pub fn new(palette: Palette, params: DispatcherParams) -> Self {
        Self {
            palette,
            balls: BallDetector::new(params.ball),
            zones: SafeZoneDetector::new(params.zone),
            distance: params.distance,
            filter: DistanceFilter::new(params.smoothing_window),
            mode: SearchMode::CommandOnly,
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Service one cycle: run the detector the command selects and build the
    /// outbound line. A detection miss yields the no-target sentinel, as
    /// does any unrecognized command before the first grab.
    pub fn dispatch(&mut self, command: Command, frame: &RgbImageView<'_>) -> Report {
        match command {
            Command::RedBall => self.track_ball(frame, ColorId::Red),
            Command::BlueBall => self.track_ball(frame, ColorId::Blue),
            Command::RedZone => self.locate_zone(frame, TeamColor::Red),
            Command::BlueZone => self.locate_zone(frame, TeamColor::Blue),
            Command::Unrecognized => match self.mode {
                SearchMode::CommandOnly => Report::NO_TARGET,
                SearchMode::FreeSearch => self.free_search(frame),
            },
        }
    }

    fn track_ball(&mut self, frame: &RgbImageView<'_>, color: ColorId) -> Report {
        let range = self.palette.range(color);
        let balls = self.balls.detect(frame, &range);
        let Some(best) = balls.first() else {
            return Report::NO_TARGET;
        };
        let (dx, dy) = offset(
            best.center.x.round() as i32,
            best.center.y.round() as i32,
            frame.width,
            frame.height,
        );
        let raw = self.distance.estimate(best.radius);
        let distance = self.filter.smooth(raw);
        log::debug!("{color} ball at dx={dx} dy={dy}, {distance} cm");
        Report { dx, dy, distance }
    }

    fn locate_zone(&mut self, frame: &RgbImageView<'_>, team: TeamColor) -> Report {
        let Some(zone) = self.zones.detect_first(frame, &self.palette, Some(team)) else {
            return Report::NO_TARGET;
        };
        if self.mode == SearchMode::CommandOnly {
            self.mode = SearchMode::FreeSearch;
            log::info!("first safe zone serviced, switching to free search");
        }
        let (dx, dy) = offset(
            zone.center.x.round() as i32,
            zone.center.y.round() as i32,
            frame.width,
            frame.height,
        );
        Report {
            dx,
            dy,
            distance: 0,
        }
    }

    /// Try each known ball color in fixed order, reporting the first hit.
    fn free_search(&mut self, frame: &RgbImageView<'_>) -> Report {
        for color in FREE_SEARCH_ORDER {
            let report = self.track_ball(frame, color);
            if report != Report::NO_TARGET {
                return report;
            }
        }
        Report::NO_TARGET
    }
}
