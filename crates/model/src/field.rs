//! Value-field catalog.
//!
//! The catalog is a single table with one row per value field of the schema.
//! Each row names the Rust variant, the schema name, the repeated entity whose
//! index tuple addresses the field (`-` for root-level fields), the property
//! path below that entity and the declared value type. The `fields!` macro
//! expands the table into the [`Field`] enum and its static descriptor array,
//! so every accessor in the metadata layer is driven by this one table.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::SchemaError;
use crate::value::ValueType;

/// Static description of one value field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The field being described.
    pub field: Field,
    /// Schema name of the field, e.g. `PixelsSizeX`.
    pub name: &'static str,
    /// The repeated entity whose index tuple addresses the field.
    pub entity: Option<Entity>,
    /// Property path below the entity, e.g. `Dimensions.PhysicalSizeX`.
    pub property: &'static str,
    /// Declared value type.
    pub value_type: ValueType,
}

impl FieldDescriptor {
    /// Returns the number of indices required to address the field.
    pub fn arity(&self) -> usize {
        self.entity.map(Entity::depth).unwrap_or(0)
    }

    /// Returns the entity-path template, e.g. `Image[].Pixels[].SizeX`.
    pub fn path_template(&self) -> String {
        match self.entity {
            Some(entity) => format!("{}.{}", entity.path_template(), self.property),
            None => self.property.to_string(),
        }
    }
}

macro_rules! field_entity {
    (-) => {
        None
    };
    ($entity:ident) => {
        Some(Entity::$entity)
    };
}

macro_rules! fields {
    ($($variant:ident = $name:literal, $entity:tt, $property:literal, $ty:ident;)*) => {
        /// A value field of the schema.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[allow(missing_docs)]
        pub enum Field {
            $($variant,)*
        }

        static DESCRIPTORS: &[FieldDescriptor] = &[
            $(FieldDescriptor {
                field: Field::$variant,
                name: $name,
                entity: field_entity!($entity),
                property: $property,
                value_type: ValueType::$ty,
            },)*
        ];
    };
}

fields! {
    Uuid = "UUID", -, "UUID", String;
    ArcType = "ArcType", LightSource, "Arc.Type", String;
    ChannelComponentColorDomain = "ChannelComponentColorDomain", ChannelComponent, "ColorDomain", String;
    ChannelComponentIndex = "ChannelComponentIndex", ChannelComponent, "Index", Integer;
    DetectorGain = "DetectorGain", Detector, "Gain", Float;
    DetectorId = "DetectorID", Detector, "ID", String;
    DetectorManufacturer = "DetectorManufacturer", Detector, "Manufacturer", String;
    DetectorModel = "DetectorModel", Detector, "Model", String;
    DetectorOffset = "DetectorOffset", Detector, "Offset", Float;
    DetectorSerialNumber = "DetectorSerialNumber", Detector, "SerialNumber", String;
    DetectorType = "DetectorType", Detector, "Type", String;
    DetectorVoltage = "DetectorVoltage", Detector, "Voltage", Float;
    DetectorSettingsDetector = "DetectorSettingsDetector", LogicalChannel, "DetectorSettings.Detector", String;
    DetectorSettingsGain = "DetectorSettingsGain", LogicalChannel, "DetectorSettings.Gain", Float;
    DetectorSettingsOffset = "DetectorSettingsOffset", LogicalChannel, "DetectorSettings.Offset", Float;
    DimensionsPhysicalSizeX = "DimensionsPhysicalSizeX", Pixels, "Dimensions.PhysicalSizeX", Float;
    DimensionsPhysicalSizeY = "DimensionsPhysicalSizeY", Pixels, "Dimensions.PhysicalSizeY", Float;
    DimensionsPhysicalSizeZ = "DimensionsPhysicalSizeZ", Pixels, "Dimensions.PhysicalSizeZ", Float;
    DimensionsTimeIncrement = "DimensionsTimeIncrement", Pixels, "Dimensions.TimeIncrement", Float;
    DimensionsWaveIncrement = "DimensionsWaveIncrement", Pixels, "Dimensions.WaveIncrement", Integer;
    DimensionsWaveStart = "DimensionsWaveStart", Pixels, "Dimensions.WaveStart", Integer;
    DisplayOptionsId = "DisplayOptionsID", Image, "DisplayOptions.ID", String;
    DisplayOptionsZoom = "DisplayOptionsZoom", Image, "DisplayOptions.Zoom", Float;
    DisplayOptionsProjectionZStart = "DisplayOptionsProjectionZStart", Image, "DisplayOptions.Projection.ZStart", Integer;
    DisplayOptionsProjectionZStop = "DisplayOptionsProjectionZStop", Image, "DisplayOptions.Projection.ZStop", Integer;
    DisplayOptionsTimeTStart = "DisplayOptionsTimeTStart", Image, "DisplayOptions.Time.TStart", Integer;
    DisplayOptionsTimeTStop = "DisplayOptionsTimeTStop", Image, "DisplayOptions.Time.TStop", Integer;
    ExperimentDescription = "ExperimentDescription", Experiment, "Description", String;
    ExperimentId = "ExperimentID", Experiment, "ID", String;
    ExperimentType = "ExperimentType", Experiment, "Type", String;
    ExperimenterEmail = "ExperimenterEmail", Experimenter, "Email", String;
    ExperimenterFirstName = "ExperimenterFirstName", Experimenter, "FirstName", String;
    ExperimenterId = "ExperimenterID", Experimenter, "ID", String;
    ExperimenterInstitution = "ExperimenterInstitution", Experimenter, "Institution", String;
    ExperimenterLastName = "ExperimenterLastName", Experimenter, "LastName", String;
    ExperimenterMembershipGroup = "ExperimenterMembershipGroup", GroupRef, "Group", String;
    FilamentType = "FilamentType", LightSource, "Filament.Type", String;
    ImageCreationDate = "ImageCreationDate", Image, "CreationDate", Timestamp;
    ImageDefaultPixels = "ImageDefaultPixels", Image, "DefaultPixels", String;
    ImageDescription = "ImageDescription", Image, "Description", String;
    ImageId = "ImageID", Image, "ID", String;
    ImageInstrumentRef = "ImageInstrumentRef", Image, "InstrumentRef", String;
    ImageName = "ImageName", Image, "Name", String;
    ImagingEnvironmentAirPressure = "ImagingEnvironmentAirPressure", Image, "ImagingEnvironment.AirPressure", Float;
    ImagingEnvironmentCo2Percent = "ImagingEnvironmentCO2Percent", Image, "ImagingEnvironment.CO2Percent", Float;
    ImagingEnvironmentHumidity = "ImagingEnvironmentHumidity", Image, "ImagingEnvironment.Humidity", Float;
    ImagingEnvironmentTemperature = "ImagingEnvironmentTemperature", Image, "ImagingEnvironment.Temperature", Float;
    InstrumentId = "InstrumentID", Instrument, "ID", String;
    LaserFrequencyMultiplication = "LaserFrequencyMultiplication", LightSource, "Laser.FrequencyMultiplication", Integer;
    LaserLaserMedium = "LaserLaserMedium", LightSource, "Laser.LaserMedium", String;
    LaserPulse = "LaserPulse", LightSource, "Laser.Pulse", String;
    LaserTuneable = "LaserTuneable", LightSource, "Laser.Tuneable", Boolean;
    LaserType = "LaserType", LightSource, "Laser.Type", String;
    LaserWavelength = "LaserWavelength", LightSource, "Laser.Wavelength", Integer;
    LightSourceId = "LightSourceID", LightSource, "ID", String;
    LightSourceManufacturer = "LightSourceManufacturer", LightSource, "Manufacturer", String;
    LightSourceModel = "LightSourceModel", LightSource, "Model", String;
    LightSourcePower = "LightSourcePower", LightSource, "Power", Float;
    LightSourceSerialNumber = "LightSourceSerialNumber", LightSource, "SerialNumber", String;
    LightSourceSettingsAttenuation = "LightSourceSettingsAttenuation", LogicalChannel, "LightSourceSettings.Attenuation", Float;
    LightSourceSettingsLightSource = "LightSourceSettingsLightSource", LogicalChannel, "LightSourceSettings.LightSource", String;
    LightSourceSettingsWavelength = "LightSourceSettingsWavelength", LogicalChannel, "LightSourceSettings.Wavelength", Integer;
    LogicalChannelContrastMethod = "LogicalChannelContrastMethod", LogicalChannel, "ContrastMethod", String;
    LogicalChannelEmWave = "LogicalChannelEmWave", LogicalChannel, "EmWave", Integer;
    LogicalChannelExWave = "LogicalChannelExWave", LogicalChannel, "ExWave", Integer;
    LogicalChannelFluor = "LogicalChannelFluor", LogicalChannel, "Fluor", String;
    LogicalChannelId = "LogicalChannelID", LogicalChannel, "ID", String;
    LogicalChannelIlluminationType = "LogicalChannelIlluminationType", LogicalChannel, "IlluminationType", String;
    LogicalChannelMode = "LogicalChannelMode", LogicalChannel, "Mode", String;
    LogicalChannelName = "LogicalChannelName", LogicalChannel, "Name", String;
    LogicalChannelNdFilter = "LogicalChannelNdFilter", LogicalChannel, "NdFilter", Float;
    LogicalChannelOtf = "LogicalChannelOTF", LogicalChannel, "OTF", String;
    LogicalChannelPhotometricInterpretation = "LogicalChannelPhotometricInterpretation", LogicalChannel, "PhotometricInterpretation", String;
    LogicalChannelPinholeSize = "LogicalChannelPinholeSize", LogicalChannel, "PinholeSize", Integer;
    LogicalChannelPockelCellSetting = "LogicalChannelPockelCellSetting", LogicalChannel, "PockelCellSetting", Integer;
    LogicalChannelSamplesPerPixel = "LogicalChannelSamplesPerPixel", LogicalChannel, "SamplesPerPixel", Integer;
    OtfId = "OTFID", Otf, "ID", String;
    OtfObjective = "OTFObjective", Otf, "Objective", String;
    OtfOpticalAxisAveraged = "OTFOpticalAxisAveraged", Otf, "OpticalAxisAveraged", Boolean;
    OtfPixelType = "OTFPixelType", Otf, "PixelType", String;
    OtfSizeX = "OTFSizeX", Otf, "SizeX", Integer;
    OtfSizeY = "OTFSizeY", Otf, "SizeY", Integer;
    ObjectiveCalibratedMagnification = "ObjectiveCalibratedMagnification", Objective, "CalibratedMagnification", Float;
    ObjectiveCorrection = "ObjectiveCorrection", Objective, "Correction", String;
    ObjectiveId = "ObjectiveID", Objective, "ID", String;
    ObjectiveImmersion = "ObjectiveImmersion", Objective, "Immersion", String;
    ObjectiveLensNa = "ObjectiveLensNA", Objective, "LensNA", Float;
    ObjectiveManufacturer = "ObjectiveManufacturer", Objective, "Manufacturer", String;
    ObjectiveModel = "ObjectiveModel", Objective, "Model", String;
    ObjectiveNominalMagnification = "ObjectiveNominalMagnification", Objective, "NominalMagnification", Integer;
    ObjectiveSerialNumber = "ObjectiveSerialNumber", Objective, "SerialNumber", String;
    ObjectiveWorkingDistance = "ObjectiveWorkingDistance", Objective, "WorkingDistance", Float;
    PixelsBigEndian = "PixelsBigEndian", Pixels, "BigEndian", Boolean;
    PixelsDimensionOrder = "PixelsDimensionOrder", Pixels, "DimensionOrder", String;
    PixelsId = "PixelsID", Pixels, "ID", String;
    PixelsPixelType = "PixelsPixelType", Pixels, "PixelType", String;
    PixelsSizeC = "PixelsSizeC", Pixels, "SizeC", Integer;
    PixelsSizeT = "PixelsSizeT", Pixels, "SizeT", Integer;
    PixelsSizeX = "PixelsSizeX", Pixels, "SizeX", Integer;
    PixelsSizeY = "PixelsSizeY", Pixels, "SizeY", Integer;
    PixelsSizeZ = "PixelsSizeZ", Pixels, "SizeZ", Integer;
    PlaneTheC = "PlaneTheC", Plane, "TheC", Integer;
    PlaneTheT = "PlaneTheT", Plane, "TheT", Integer;
    PlaneTheZ = "PlaneTheZ", Plane, "TheZ", Integer;
    PlaneTimingDeltaT = "PlaneTimingDeltaT", Plane, "PlaneTiming.DeltaT", Float;
    PlaneTimingExposureTime = "PlaneTimingExposureTime", Plane, "PlaneTiming.ExposureTime", Float;
    PlateDescription = "PlateDescription", Plate, "Description", String;
    PlateExternalIdentifier = "PlateExternalIdentifier", Plate, "ExternalIdentifier", String;
    PlateId = "PlateID", Plate, "ID", String;
    PlateName = "PlateName", Plate, "Name", String;
    PlateStatus = "PlateStatus", Plate, "Status", String;
    PlateRefId = "PlateRefID", PlateRef, "ID", String;
    RoiId = "ROIID", Roi, "ID", String;
    RoiT0 = "ROIT0", Roi, "T0", Integer;
    RoiT1 = "ROIT1", Roi, "T1", Integer;
    RoiX0 = "ROIX0", Roi, "X0", Integer;
    RoiX1 = "ROIX1", Roi, "X1", Integer;
    RoiY0 = "ROIY0", Roi, "Y0", Integer;
    RoiY1 = "ROIY1", Roi, "Y1", Integer;
    RoiZ0 = "ROIZ0", Roi, "Z0", Integer;
    RoiZ1 = "ROIZ1", Roi, "Z1", Integer;
    ReagentDescription = "ReagentDescription", Reagent, "Description", String;
    ReagentId = "ReagentID", Reagent, "ID", String;
    ReagentName = "ReagentName", Reagent, "Name", String;
    ReagentReagentIdentifier = "ReagentReagentIdentifier", Reagent, "ReagentIdentifier", String;
    ScreenId = "ScreenID", Screen, "ID", String;
    ScreenName = "ScreenName", Screen, "Name", String;
    ScreenProtocolDescription = "ScreenProtocolDescription", Screen, "ProtocolDescription", String;
    ScreenProtocolIdentifier = "ScreenProtocolIdentifier", Screen, "ProtocolIdentifier", String;
    ScreenReagentSetDescription = "ScreenReagentSetDescription", Screen, "ReagentSetDescription", String;
    ScreenType = "ScreenType", Screen, "Type", String;
    ScreenAcquisitionEndTime = "ScreenAcquisitionEndTime", ScreenAcquisition, "EndTime", Timestamp;
    ScreenAcquisitionId = "ScreenAcquisitionID", ScreenAcquisition, "ID", String;
    ScreenAcquisitionStartTime = "ScreenAcquisitionStartTime", ScreenAcquisition, "StartTime", Timestamp;
    StageLabelName = "StageLabelName", Image, "StageLabel.Name", String;
    StageLabelX = "StageLabelX", Image, "StageLabel.X", Float;
    StageLabelY = "StageLabelY", Image, "StageLabel.Y", Float;
    StageLabelZ = "StageLabelZ", Image, "StageLabel.Z", Float;
    StagePositionPositionX = "StagePositionPositionX", Plane, "StagePosition.PositionX", Float;
    StagePositionPositionY = "StagePositionPositionY", Plane, "StagePosition.PositionY", Float;
    StagePositionPositionZ = "StagePositionPositionZ", Plane, "StagePosition.PositionZ", Float;
    TiffDataFileName = "TiffDataFileName", TiffData, "FileName", String;
    TiffDataFirstC = "TiffDataFirstC", TiffData, "FirstC", Integer;
    TiffDataFirstT = "TiffDataFirstT", TiffData, "FirstT", Integer;
    TiffDataFirstZ = "TiffDataFirstZ", TiffData, "FirstZ", Integer;
    TiffDataIfd = "TiffDataIFD", TiffData, "IFD", Integer;
    TiffDataNumPlanes = "TiffDataNumPlanes", TiffData, "NumPlanes", Integer;
    TiffDataUuid = "TiffDataUUID", TiffData, "UUID", String;
    WellColumn = "WellColumn", Well, "Column", Integer;
    WellExternalDescription = "WellExternalDescription", Well, "ExternalDescription", String;
    WellExternalIdentifier = "WellExternalIdentifier", Well, "ExternalIdentifier", String;
    WellId = "WellID", Well, "ID", String;
    WellRow = "WellRow", Well, "Row", Integer;
    WellType = "WellType", Well, "Type", String;
    WellSampleId = "WellSampleID", WellSample, "ID", String;
    WellSampleIndex = "WellSampleIndex", WellSample, "Index", Integer;
    WellSamplePosX = "WellSamplePosX", WellSample, "PosX", Float;
    WellSamplePosY = "WellSamplePosY", WellSample, "PosY", Float;
    WellSampleTimepoint = "WellSampleTimepoint", WellSample, "Timepoint", Integer;
}

static BY_NAME: LazyLock<HashMap<&'static str, Field>> =
    LazyLock::new(|| DESCRIPTORS.iter().map(|d| (d.name, d.field)).collect());

impl Field {
    /// Returns the descriptors of every field, in table order.
    pub fn descriptors() -> &'static [FieldDescriptor] {
        DESCRIPTORS
    }

    /// Iterates over every field, in table order.
    pub fn all() -> impl Iterator<Item = Field> {
        DESCRIPTORS.iter().map(|d| d.field)
    }

    /// Returns the static descriptor of this field.
    pub fn descriptor(self) -> &'static FieldDescriptor {
        &DESCRIPTORS[self as usize]
    }

    /// Returns the schema name of this field.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Returns the entity whose index tuple addresses this field.
    pub fn entity(self) -> Option<Entity> {
        self.descriptor().entity
    }

    /// Returns the declared value type.
    pub fn value_type(self) -> ValueType {
        self.descriptor().value_type
    }

    /// Returns the number of indices required to address this field.
    pub fn arity(self) -> usize {
        self.descriptor().arity()
    }

    /// Looks up a field by its schema name.
    pub fn from_name(name: &str) -> Option<Field> {
        BY_NAME.get(name).copied()
    }

    /// Iterates over the fields addressed by the given entity.
    pub fn of_entity(entity: Entity) -> impl Iterator<Item = Field> {
        DESCRIPTORS
            .iter()
            .filter(move |d| d.entity == Some(entity))
            .map(|d| d.field)
    }

    /// Iterates over the root-level fields (arity 0).
    pub fn root_fields() -> impl Iterator<Item = Field> {
        DESCRIPTORS
            .iter()
            .filter(|d| d.entity.is_none())
            .map(|d| d.field)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_name(s).ok_or_else(|| SchemaError::UnknownField {
            name: s.to_string(),
        })
    }
}
