//! Repeated entities of the metadata schema.
//!
//! Every repeated element of the schema (an image, a channel, a detector...)
//! is addressed by an index tuple. The tuple of an instance is its parent's
//! tuple followed by its own index, so an entity's *depth* equals the length
//! of the tuple that addresses one of its instances:
//!
//! ```text
//! Image[i]                      depth 1
//! Image[i].Pixels[p]            depth 2
//! Image[i].Pixels[p].Plane[n]   depth 3
//! ```
//!
//! Each entity also owns exactly one counting field, `<Entity>Count`, whose
//! indices are those of the parent instance.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// A repeated entity of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Entity {
    /// A person who performs experiments.
    Experimenter,
    /// Group membership of an experimenter.
    ///
    /// This is the only membership entity. The legacy separate
    /// experimenter-membership count is not modelled, so membership is
    /// always counted as `GroupRef` below an experimenter.
    GroupRef,
    /// An experiment description.
    Experiment,
    /// An acquired image.
    Image,
    /// A pixel set belonging to an image.
    Pixels,
    /// A single plane of a pixel set.
    Plane,
    /// Mapping of planes onto TIFF IFDs.
    TiffData,
    /// A logical channel of an image.
    LogicalChannel,
    /// A component of a logical channel.
    ChannelComponent,
    /// A region of interest within an image.
    Roi,
    /// A microscope.
    Instrument,
    /// A detector mounted on an instrument.
    Detector,
    /// A light source (laser, arc, filament) mounted on an instrument.
    LightSource,
    /// An objective lens mounted on an instrument.
    Objective,
    /// An optical transfer function of an instrument.
    Otf,
    /// A multi-well plate.
    Plate,
    /// A well of a plate.
    Well,
    /// A sample acquired in a well.
    WellSample,
    /// A screen grouping plates.
    Screen,
    /// Reference from a screen to a plate.
    PlateRef,
    /// A reagent used by a screen.
    Reagent,
    /// An acquisition run of a screen.
    ScreenAcquisition,
}

impl Entity {
    /// Every entity, parents listed before their children.
    pub const ALL: &'static [Entity] = &[
        Entity::Experimenter,
        Entity::GroupRef,
        Entity::Experiment,
        Entity::Image,
        Entity::Pixels,
        Entity::Plane,
        Entity::TiffData,
        Entity::LogicalChannel,
        Entity::ChannelComponent,
        Entity::Roi,
        Entity::Instrument,
        Entity::Detector,
        Entity::LightSource,
        Entity::Objective,
        Entity::Otf,
        Entity::Plate,
        Entity::Well,
        Entity::WellSample,
        Entity::Screen,
        Entity::PlateRef,
        Entity::Reagent,
        Entity::ScreenAcquisition,
    ];

    /// Returns the schema name of the entity.
    pub fn name(self) -> &'static str {
        match self {
            Entity::Experimenter => "Experimenter",
            Entity::GroupRef => "GroupRef",
            Entity::Experiment => "Experiment",
            Entity::Image => "Image",
            Entity::Pixels => "Pixels",
            Entity::Plane => "Plane",
            Entity::TiffData => "TiffData",
            Entity::LogicalChannel => "LogicalChannel",
            Entity::ChannelComponent => "ChannelComponent",
            Entity::Roi => "ROI",
            Entity::Instrument => "Instrument",
            Entity::Detector => "Detector",
            Entity::LightSource => "LightSource",
            Entity::Objective => "Objective",
            Entity::Otf => "OTF",
            Entity::Plate => "Plate",
            Entity::Well => "Well",
            Entity::WellSample => "WellSample",
            Entity::Screen => "Screen",
            Entity::PlateRef => "PlateRef",
            Entity::Reagent => "Reagent",
            Entity::ScreenAcquisition => "ScreenAcquisition",
        }
    }

    /// Returns the containing entity, or `None` for top-level entities.
    pub fn parent(self) -> Option<Entity> {
        match self {
            Entity::Experimenter
            | Entity::Experiment
            | Entity::Image
            | Entity::Instrument
            | Entity::Plate
            | Entity::Screen => None,
            Entity::GroupRef => Some(Entity::Experimenter),
            Entity::Pixels | Entity::LogicalChannel | Entity::Roi => Some(Entity::Image),
            Entity::Plane | Entity::TiffData => Some(Entity::Pixels),
            Entity::ChannelComponent => Some(Entity::LogicalChannel),
            Entity::Detector | Entity::LightSource | Entity::Objective | Entity::Otf => {
                Some(Entity::Instrument)
            }
            Entity::Well => Some(Entity::Plate),
            Entity::WellSample => Some(Entity::Well),
            Entity::PlateRef | Entity::Reagent | Entity::ScreenAcquisition => {
                Some(Entity::Screen)
            }
        }
    }

    /// Returns the number of indices that address one instance.
    pub fn depth(self) -> usize {
        let mut depth = 1;
        let mut current = self;
        while let Some(parent) = current.parent() {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Returns the number of indices taken by this entity's counting field.
    pub fn count_arity(self) -> usize {
        self.depth() - 1
    }

    /// Returns the chain from the top-level ancestor down to this entity.
    pub fn chain(self) -> Vec<Entity> {
        let mut chain = vec![self];
        let mut current = self;
        while let Some(parent) = current.parent() {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// Returns true if `ancestor` is this entity or one of its ancestors.
    pub fn descends_from(self, ancestor: Entity) -> bool {
        let mut current = Some(self);
        while let Some(entity) = current {
            if entity == ancestor {
                return true;
            }
            current = entity.parent();
        }
        false
    }

    /// Returns the direct children of this entity.
    pub fn children(self) -> impl Iterator<Item = Entity> {
        Entity::ALL
            .iter()
            .copied()
            .filter(move |e| e.parent() == Some(self))
    }

    /// Returns the top-level entities.
    pub fn roots() -> impl Iterator<Item = Entity> {
        Entity::ALL.iter().copied().filter(|e| e.parent().is_none())
    }

    /// Returns the schema name of the counting field, e.g. `PixelsCount`.
    pub fn count_name(self) -> String {
        format!("{}Count", self.name())
    }

    /// Returns the path template of an instance, e.g. `Image[].Pixels[]`.
    pub fn path_template(self) -> String {
        self.chain()
            .iter()
            .map(|e| format!("{}[]", e.name()))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Looks up an entity by its schema name.
    pub fn from_name(name: &str) -> Option<Entity> {
        Entity::ALL.iter().copied().find(|e| e.name() == name)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Entity {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Entity::from_name(s).ok_or_else(|| SchemaError::UnknownEntity {
            name: s.to_string(),
        })
    }
}
