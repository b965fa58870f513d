//! Static catalog of UVC 1.1 camera terminal and processing unit controls.
//!
//! Each [`ControlDefinition`] records the wire encoding of one control: selector, owning
//! unit, payload length, field layout and the request verbs it answers. The catalog is
//! built at compile time and has no registration API.

use std::fmt;
use std::str::FromStr;

use crate::traits::{Request, Result, UnitType, UvcError};

use FieldKind::{Bitmap, Boolean, Signed, Unsigned};
use Request::{GetCur, GetDef, GetInfo, GetMax, GetMin, GetRes, SetCur};
use UnitType::{CameraTerminal, ProcessingUnit};

/// Symbolic identifier of a registered control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ControlId {
    /// Interlaced or progressive sensor scanning.
    ScanningMode,
    /// Automatic exposure time / iris mode.
    AutoExposureMode,
    /// Whether auto exposure may vary the frame rate.
    AutoExposurePriority,
    /// Exposure time in 100 µs units.
    AbsoluteExposureTime,
    /// Step the exposure time up or down.
    RelativeExposureTime,
    /// Focus distance in millimeters.
    AbsoluteFocus,
    /// Move the focus lens group.
    RelativeFocus,
    /// Aperture in f-stop * 100.
    AbsoluteIris,
    /// Step the aperture open or closed.
    RelativeIris,
    /// Objective lens focal length.
    AbsoluteZoom,
    /// Powered zoom movement.
    RelativeZoom,
    /// Pan and tilt in arc seconds.
    AbsolutePanTilt,
    /// Pan and tilt movement.
    RelativePanTilt,
    /// Roll in degrees.
    AbsoluteRoll,
    /// Roll movement.
    RelativeRoll,
    /// Automatic focus.
    AutoFocus,
    /// Privacy shutter.
    Privacy,
    /// Backlight compensation.
    BacklightCompensation,
    /// Brightness.
    Brightness,
    /// Contrast.
    Contrast,
    /// Gain.
    Gain,
    /// Anti-flicker power line frequency.
    PowerLineFrequency,
    /// Hue in degrees * 100.
    Hue,
    /// Saturation.
    Saturation,
    /// Sharpness.
    Sharpness,
    /// Gamma * 100.
    Gamma,
    /// White balance as a color temperature in kelvin.
    WhiteBalanceTemperature,
    /// Automatic white balance temperature.
    AutoWhiteBalanceTemperature,
    /// White balance as blue and red components.
    WhiteBalanceComponent,
    /// Automatic white balance components.
    AutoWhiteBalanceComponent,
    /// Digital zoom multiplier.
    DigitalMultiplier,
    /// Upper limit for the digital zoom multiplier.
    DigitalMultiplierLimit,
    /// Automatic hue.
    AutoHue,
    /// Analog video standard of the input signal.
    AnalogVideoStandard,
    /// Analog decoder horizontal lock status.
    AnalogLockStatus,
}

impl ControlId {
    /// Every registered control, camera terminal controls first.
    pub const ALL: [Self; 35] = [
        Self::ScanningMode,
        Self::AutoExposureMode,
        Self::AutoExposurePriority,
        Self::AbsoluteExposureTime,
        Self::RelativeExposureTime,
        Self::AbsoluteFocus,
        Self::RelativeFocus,
        Self::AbsoluteIris,
        Self::RelativeIris,
        Self::AbsoluteZoom,
        Self::RelativeZoom,
        Self::AbsolutePanTilt,
        Self::RelativePanTilt,
        Self::AbsoluteRoll,
        Self::RelativeRoll,
        Self::AutoFocus,
        Self::Privacy,
        Self::BacklightCompensation,
        Self::Brightness,
        Self::Contrast,
        Self::Gain,
        Self::PowerLineFrequency,
        Self::Hue,
        Self::Saturation,
        Self::Sharpness,
        Self::Gamma,
        Self::WhiteBalanceTemperature,
        Self::AutoWhiteBalanceTemperature,
        Self::WhiteBalanceComponent,
        Self::AutoWhiteBalanceComponent,
        Self::DigitalMultiplier,
        Self::DigitalMultiplierLimit,
        Self::AutoHue,
        Self::AnalogVideoStandard,
        Self::AnalogLockStatus,
    ];

    /// The control's snake_case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ScanningMode => "scanning_mode",
            Self::AutoExposureMode => "auto_exposure_mode",
            Self::AutoExposurePriority => "auto_exposure_priority",
            Self::AbsoluteExposureTime => "absolute_exposure_time",
            Self::RelativeExposureTime => "relative_exposure_time",
            Self::AbsoluteFocus => "absolute_focus",
            Self::RelativeFocus => "relative_focus",
            Self::AbsoluteIris => "absolute_iris",
            Self::RelativeIris => "relative_iris",
            Self::AbsoluteZoom => "absolute_zoom",
            Self::RelativeZoom => "relative_zoom",
            Self::AbsolutePanTilt => "absolute_pan_tilt",
            Self::RelativePanTilt => "relative_pan_tilt",
            Self::AbsoluteRoll => "absolute_roll",
            Self::RelativeRoll => "relative_roll",
            Self::AutoFocus => "auto_focus",
            Self::Privacy => "privacy",
            Self::BacklightCompensation => "backlight_compensation",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Gain => "gain",
            Self::PowerLineFrequency => "power_line_frequency",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Sharpness => "sharpness",
            Self::Gamma => "gamma",
            Self::WhiteBalanceTemperature => "white_balance_temperature",
            Self::AutoWhiteBalanceTemperature => "auto_white_balance_temperature",
            Self::WhiteBalanceComponent => "white_balance_component",
            Self::AutoWhiteBalanceComponent => "auto_white_balance_component",
            Self::DigitalMultiplier => "digital_multiplier",
            Self::DigitalMultiplierLimit => "digital_multiplier_limit",
            Self::AutoHue => "auto_hue",
            Self::AnalogVideoStandard => "analog_video_standard",
            Self::AnalogLockStatus => "analog_lock_status",
        }
    }

    /// The control's wire definition.
    #[must_use]
    pub fn definition(self) -> &'static ControlDefinition {
        match self {
            Self::ScanningMode => &SCANNING_MODE,
            Self::AutoExposureMode => &AUTO_EXPOSURE_MODE,
            Self::AutoExposurePriority => &AUTO_EXPOSURE_PRIORITY,
            Self::AbsoluteExposureTime => &ABSOLUTE_EXPOSURE_TIME,
            Self::RelativeExposureTime => &RELATIVE_EXPOSURE_TIME,
            Self::AbsoluteFocus => &ABSOLUTE_FOCUS,
            Self::RelativeFocus => &RELATIVE_FOCUS,
            Self::AbsoluteIris => &ABSOLUTE_IRIS,
            Self::RelativeIris => &RELATIVE_IRIS,
            Self::AbsoluteZoom => &ABSOLUTE_ZOOM,
            Self::RelativeZoom => &RELATIVE_ZOOM,
            Self::AbsolutePanTilt => &ABSOLUTE_PAN_TILT,
            Self::RelativePanTilt => &RELATIVE_PAN_TILT,
            Self::AbsoluteRoll => &ABSOLUTE_ROLL,
            Self::RelativeRoll => &RELATIVE_ROLL,
            Self::AutoFocus => &AUTO_FOCUS,
            Self::Privacy => &PRIVACY,
            Self::BacklightCompensation => &BACKLIGHT_COMPENSATION,
            Self::Brightness => &BRIGHTNESS,
            Self::Contrast => &CONTRAST,
            Self::Gain => &GAIN,
            Self::PowerLineFrequency => &POWER_LINE_FREQUENCY,
            Self::Hue => &HUE,
            Self::Saturation => &SATURATION,
            Self::Sharpness => &SHARPNESS,
            Self::Gamma => &GAMMA,
            Self::WhiteBalanceTemperature => &WHITE_BALANCE_TEMPERATURE,
            Self::AutoWhiteBalanceTemperature => &AUTO_WHITE_BALANCE_TEMPERATURE,
            Self::WhiteBalanceComponent => &WHITE_BALANCE_COMPONENT,
            Self::AutoWhiteBalanceComponent => &AUTO_WHITE_BALANCE_COMPONENT,
            Self::DigitalMultiplier => &DIGITAL_MULTIPLIER,
            Self::DigitalMultiplierLimit => &DIGITAL_MULTIPLIER_LIMIT,
            Self::AutoHue => &AUTO_HUE,
            Self::AnalogVideoStandard => &ANALOG_VIDEO_STANDARD,
            Self::AnalogLockStatus => &ANALOG_LOCK_STATUS,
        }
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlId {
    type Err = UvcError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UvcError::UnknownControl(s.to_owned()))
    }
}

/// Look up a control definition by its snake_case name.
///
/// # Errors
///
/// Returns `UnknownControl` if no control is registered under `name`.
pub fn lookup(name: &str) -> Result<&'static ControlDefinition> {
    name.parse::<ControlId>().map(ControlId::definition)
}

/// How a field's bytes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Two's complement integer.
    Signed,
    /// Unsigned integer.
    Unsigned,
    /// Zero is false, anything else is true.
    Boolean,
    /// Raw bit set, optionally named through the symbol table.
    Bitmap,
}

/// A named value a field may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    /// Symbol name.
    pub name: &'static str,
    /// Decoded integer value.
    pub value: i64,
}

const fn sym(name: &'static str, value: i64) -> Symbol {
    Symbol { name, value }
}

/// One fixed-offset little-endian field inside a control payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Field name as it appears in the UVC tables.
    pub name: &'static str,
    /// Byte offset within the payload.
    pub offset: usize,
    /// Width in bytes.
    pub size: usize,
    /// Encoding.
    pub kind: FieldKind,
    /// Named values, possibly empty.
    pub symbols: &'static [Symbol],
}

impl FieldDefinition {
    const fn new(name: &'static str, offset: usize, size: usize, kind: FieldKind) -> Self {
        Self {
            name,
            offset,
            size,
            kind,
            symbols: &[],
        }
    }

    const fn with_symbols(self, symbols: &'static [Symbol]) -> Self {
        Self { symbols, ..self }
    }

    /// One past the last byte this field occupies.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.size
    }

    /// Zero-width fields are layout placeholders and carry no data.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.size == 0
    }

    /// Name attached to `value` in the symbol table, if any.
    #[must_use]
    pub fn symbol_for(&self, value: i64) -> Option<&'static str> {
        self.symbols
            .iter()
            .find(|symbol| symbol.value == value)
            .map(|symbol| symbol.name)
    }

    /// Value attached to a symbol name, if any.
    #[must_use]
    pub fn symbol_value(&self, name: &str) -> Option<i64> {
        self.symbols
            .iter()
            .find(|symbol| symbol.name == name)
            .map(|symbol| symbol.value)
    }
}

/// Wire description of one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlDefinition {
    /// Symbolic id.
    pub id: ControlId,
    /// Short human description.
    pub description: &'static str,
    /// Control selector within the owning unit.
    pub selector: u8,
    /// Unit the control lives on.
    pub unit: UnitType,
    /// Payload length in bytes (`wLength`).
    pub length: u16,
    /// Fields in payload order.
    pub fields: &'static [FieldDefinition],
    /// Verbs every implementation must answer.
    pub requests: &'static [Request],
    /// Verbs a device may additionally answer.
    pub optional_requests: &'static [Request],
}

impl ControlDefinition {
    /// Whether `request` is declared as mandatory or optional for this control.
    #[must_use]
    pub fn permits(&self, request: Request) -> bool {
        self.requests.contains(&request) || self.optional_requests.contains(&request)
    }

    /// Field with the given name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Whether the payload is several fields of one width and kind, e.g. pan and tilt.
    #[must_use]
    pub fn is_homogeneous(&self) -> bool {
        match self.fields.split_first() {
            Some((first, rest)) => rest
                .iter()
                .all(|field| field.size == first.size && field.kind == first.kind),
            None => true,
        }
    }
}

/// Camera terminal `bmControls` layout, bit 0 first. `None` marks reserved bits.
pub const CAMERA_TERMINAL_CAPABILITIES: [Option<ControlId>; 19] = [
    Some(ControlId::ScanningMode),
    Some(ControlId::AutoExposureMode),
    Some(ControlId::AutoExposurePriority),
    Some(ControlId::AbsoluteExposureTime),
    Some(ControlId::RelativeExposureTime),
    Some(ControlId::AbsoluteFocus),
    Some(ControlId::RelativeFocus),
    Some(ControlId::AbsoluteIris),
    Some(ControlId::RelativeIris),
    Some(ControlId::AbsoluteZoom),
    Some(ControlId::RelativeZoom),
    Some(ControlId::AbsolutePanTilt),
    Some(ControlId::RelativePanTilt),
    Some(ControlId::AbsoluteRoll),
    Some(ControlId::RelativeRoll),
    None,
    None,
    Some(ControlId::AutoFocus),
    Some(ControlId::Privacy),
];

/// Processing unit `bmControls` layout, bit 0 first.
pub const PROCESSING_UNIT_CAPABILITIES: [Option<ControlId>; 18] = [
    Some(ControlId::Brightness),
    Some(ControlId::Contrast),
    Some(ControlId::Hue),
    Some(ControlId::Saturation),
    Some(ControlId::Sharpness),
    Some(ControlId::Gamma),
    Some(ControlId::WhiteBalanceTemperature),
    Some(ControlId::WhiteBalanceComponent),
    Some(ControlId::BacklightCompensation),
    Some(ControlId::Gain),
    Some(ControlId::PowerLineFrequency),
    Some(ControlId::AutoHue),
    Some(ControlId::AutoWhiteBalanceTemperature),
    Some(ControlId::AutoWhiteBalanceComponent),
    Some(ControlId::DigitalMultiplier),
    Some(ControlId::DigitalMultiplierLimit),
    Some(ControlId::AnalogVideoStandard),
    Some(ControlId::AnalogLockStatus),
];

/// Capability layout for a unit type.
#[must_use]
pub const fn capability_table(unit: UnitType) -> &'static [Option<ControlId>] {
    match unit {
        UnitType::CameraTerminal => &CAMERA_TERMINAL_CAPABILITIES,
        UnitType::ProcessingUnit => &PROCESSING_UNIT_CAPABILITIES,
    }
}

/// Every control definition, in [`ControlId::ALL`] order.
#[must_use]
pub fn definitions() -> impl Iterator<Item = &'static ControlDefinition> {
    ControlId::ALL.iter().map(|id| id.definition())
}

const FULL: &[Request] = &[SetCur, GetCur, GetMin, GetMax, GetRes, GetInfo, GetDef];
const READ_RANGE: &[Request] = &[GetCur, GetMin, GetMax, GetRes, GetInfo, GetDef];
const SWITCH: &[Request] = &[SetCur, GetCur, GetInfo];
const SWITCH_WITH_DEFAULT: &[Request] = &[SetCur, GetCur, GetInfo, GetDef];
const STATUS: &[Request] = &[GetCur, GetInfo];
const WRITABLE: &[Request] = &[SetCur];
const NONE: &[Request] = &[];

const STEP: &[Symbol] = &[
    sym("DEFAULT", 0),
    sym("INCREASE", 1),
    sym("DECREASE", -1),
];
const ROTATION: &[Symbol] = &[
    sym("STOP", 0),
    sym("CLOCKWISE", 1),
    sym("COUNTER_CLOCKWISE", -1),
];
const FOCUS_DIRECTIONS: &[Symbol] = &[sym("STOP", 0), sym("NEAR", 1), sym("INFINITY", -1)];
const ZOOM_DIRECTIONS: &[Symbol] = &[
    sym("STOP", 0),
    sym("TELEPHOTO", 1),
    sym("WIDE_ANGLE", -1),
];
const TILT_DIRECTIONS: &[Symbol] = &[sym("STOP", 0), sym("UP", 1), sym("DOWN", -1)];
const ON_OFF: &[Symbol] = &[sym("OFF", 0), sym("ON", 1)];
const SHUTTER: &[Symbol] = &[sym("OPEN", 0), sym("CLOSED", 1)];
const SCANNING_MODES: &[Symbol] = &[sym("INTERLACED", 0), sym("PROGRESSIVE", 1)];
const EXPOSURE_MODES: &[Symbol] = &[
    sym("MANUAL", 0b0001),
    sym("AUTO", 0b0010),
    sym("SHUTTER_PRIORITY", 0b0100),
    sym("APERTURE_PRIORITY", 0b1000),
];
const EXPOSURE_PRIORITIES: &[Symbol] = &[
    sym("CONSTANT_FRAME_RATE", 0),
    sym("VARIABLE_FRAME_RATE", 1),
];
const POWER_LINE_FREQUENCIES: &[Symbol] = &[sym("DISABLED", 0), sym("HZ_50", 1), sym("HZ_60", 2)];
const VIDEO_STANDARDS: &[Symbol] = &[
    sym("NONE", 0),
    sym("NTSC_525_60", 1),
    sym("PAL_625_50", 2),
    sym("SECAM_625_50", 3),
    sym("NTSC_625_50", 4),
    sym("PAL_525_60", 5),
];
const LOCK_STATES: &[Symbol] = &[sym("LOCKED", 0), sym("NOT_LOCKED", 1)];

static SCANNING_MODE: ControlDefinition = ControlDefinition {
    id: ControlId::ScanningMode,
    description: "Sensor scanning mode: interlaced (0) or progressive (1).",
    selector: 0x01,
    unit: CameraTerminal,
    length: 1,
    fields: &[
        FieldDefinition::new("bScanningMode", 0, 1, Boolean)
            .with_symbols(SCANNING_MODES),
    ],
    requests: SWITCH,
    optional_requests: NONE,
};

static AUTO_EXPOSURE_MODE: ControlDefinition = ControlDefinition {
    id: ControlId::AutoExposureMode,
    description: "Automatic adjustment of exposure time and iris. GET_RES returns the bitmap of \
                  supported modes; a SET_CUR selects exactly one.",
    selector: 0x02,
    unit: CameraTerminal,
    length: 1,
    fields: &[
        FieldDefinition::new("bAutoExposureMode", 0, 1, Bitmap)
            .with_symbols(EXPOSURE_MODES),
    ],
    requests: &[SetCur, GetCur, GetRes, GetInfo, GetDef],
    optional_requests: NONE,
};

static AUTO_EXPOSURE_PRIORITY: ControlDefinition = ControlDefinition {
    id: ControlId::AutoExposurePriority,
    description: "Whether auto exposure must hold the frame rate constant (0) or may vary it (1).",
    selector: 0x03,
    unit: CameraTerminal,
    length: 1,
    fields: &[
        FieldDefinition::new("bAutoExposurePriority", 0, 1, Unsigned)
            .with_symbols(EXPOSURE_PRIORITIES),
    ],
    requests: SWITCH,
    optional_requests: NONE,
};

static ABSOLUTE_EXPOSURE_TIME: ControlDefinition = ControlDefinition {
    id: ControlId::AbsoluteExposureTime,
    description: "Exposure time in 100 µs units. Stalls SET requests while auto exposure owns it.",
    selector: 0x04,
    unit: CameraTerminal,
    length: 4,
    fields: &[FieldDefinition::new("dwExposureTimeAbsolute", 0, 4, Unsigned)],
    requests: READ_RANGE,
    optional_requests: WRITABLE,
};

static RELATIVE_EXPOSURE_TIME: ControlDefinition = ControlDefinition {
    id: ControlId::RelativeExposureTime,
    description: "Step the exposure time one implementation-defined step up or down.",
    selector: 0x05,
    unit: CameraTerminal,
    length: 1,
    fields: &[
        FieldDefinition::new("bExposureTimeRelative", 0, 1, Signed)
            .with_symbols(STEP),
    ],
    requests: SWITCH,
    optional_requests: NONE,
};

static ABSOLUTE_FOCUS: ControlDefinition = ControlDefinition {
    id: ControlId::AbsoluteFocus,
    description: "Distance to the optimally focused target in millimeters.",
    selector: 0x06,
    unit: CameraTerminal,
    length: 2,
    fields: &[FieldDefinition::new("wFocusAbsolute", 0, 2, Unsigned)],
    requests: READ_RANGE,
    optional_requests: WRITABLE,
};

static RELATIVE_FOCUS: ControlDefinition = ControlDefinition {
    id: ControlId::RelativeFocus,
    description: "Move the focus lens group toward near (1) or infinity (-1), at bSpeed.",
    selector: 0x07,
    unit: CameraTerminal,
    length: 2,
    fields: &[
        FieldDefinition::new("bFocusRelative", 0, 1, Signed)
            .with_symbols(FOCUS_DIRECTIONS),
        FieldDefinition::new("bSpeed", 1, 1, Unsigned),
    ],
    requests: FULL,
    optional_requests: NONE,
};

static ABSOLUTE_IRIS: ControlDefinition = ControlDefinition {
    id: ControlId::AbsoluteIris,
    description: "Aperture setting in f-stop * 100.",
    selector: 0x09,
    unit: CameraTerminal,
    length: 2,
    fields: &[FieldDefinition::new("wIrisAbsolute", 0, 2, Unsigned)],
    requests: READ_RANGE,
    optional_requests: WRITABLE,
};

static RELATIVE_IRIS: ControlDefinition = ControlDefinition {
    id: ControlId::RelativeIris,
    description: "Open (1) or close (-1) the iris by one step.",
    selector: 0x0A,
    unit: CameraTerminal,
    length: 1,
    fields: &[
        FieldDefinition::new("bIrisRelative", 0, 1, Signed)
            .with_symbols(STEP),
    ],
    requests: SWITCH,
    optional_requests: NONE,
};

static ABSOLUTE_ZOOM: ControlDefinition = ControlDefinition {
    id: ControlId::AbsoluteZoom,
    description: "Objective lens focal length. RES is always 1.",
    selector: 0x0B,
    unit: CameraTerminal,
    length: 2,
    fields: &[FieldDefinition::new("wObjectiveFocalLength", 0, 2, Unsigned)],
    requests: READ_RANGE,
    optional_requests: WRITABLE,
};

static RELATIVE_ZOOM: ControlDefinition = ControlDefinition {
    id: ControlId::RelativeZoom,
    description: "Powered zoom toward telephoto (1) or wide angle (-1), optionally digital.",
    selector: 0x0C,
    unit: CameraTerminal,
    length: 3,
    fields: &[
        FieldDefinition::new("bZoom", 0, 1, Signed)
            .with_symbols(ZOOM_DIRECTIONS),
        FieldDefinition::new("bDigitalZoom", 1, 1, Boolean)
            .with_symbols(ON_OFF),
        FieldDefinition::new("bSpeed", 2, 1, Unsigned),
    ],
    requests: FULL,
    optional_requests: NONE,
};

static ABSOLUTE_PAN_TILT: ControlDefinition = ControlDefinition {
    id: ControlId::AbsolutePanTilt,
    description: "Pan and tilt in arc seconds, each within -180*3600..=180*3600.",
    selector: 0x0D,
    unit: CameraTerminal,
    length: 8,
    fields: &[
        FieldDefinition::new("dwPanAbsolute", 0, 4, Signed),
        FieldDefinition::new("dwTiltAbsolute", 4, 4, Signed),
    ],
    requests: READ_RANGE,
    optional_requests: WRITABLE,
};

static RELATIVE_PAN_TILT: ControlDefinition = ControlDefinition {
    id: ControlId::RelativePanTilt,
    description: "Start or stop pan and tilt movement, each with its own speed.",
    selector: 0x0E,
    unit: CameraTerminal,
    length: 4,
    fields: &[
        FieldDefinition::new("bPanRelative", 0, 1, Signed)
            .with_symbols(ROTATION),
        FieldDefinition::new("bPanSpeed", 1, 1, Unsigned),
        FieldDefinition::new("bTiltRelative", 2, 1, Signed)
            .with_symbols(TILT_DIRECTIONS),
        FieldDefinition::new("bTiltSpeed", 3, 1, Unsigned),
    ],
    requests: FULL,
    optional_requests: NONE,
};

static ABSOLUTE_ROLL: ControlDefinition = ControlDefinition {
    id: ControlId::AbsoluteRoll,
    description: "Roll in degrees, within -180..=180.",
    selector: 0x0F,
    unit: CameraTerminal,
    length: 2,
    fields: &[FieldDefinition::new("wAbsoluteRoll", 0, 2, Signed)],
    requests: READ_RANGE,
    optional_requests: WRITABLE,
};

static RELATIVE_ROLL: ControlDefinition = ControlDefinition {
    id: ControlId::RelativeRoll,
    description: "Start or stop roll movement.",
    selector: 0x10,
    unit: CameraTerminal,
    length: 2,
    fields: &[
        FieldDefinition::new("bRollRelative", 0, 1, Signed)
            .with_symbols(ROTATION),
        FieldDefinition::new("bSpeed", 1, 1, Unsigned),
    ],
    requests: FULL,
    optional_requests: NONE,
};

static AUTO_FOCUS: ControlDefinition = ControlDefinition {
    id: ControlId::AutoFocus,
    description: "Automatic focus adjustment. While on, focus SET requests are ignored.",
    selector: 0x08,
    unit: CameraTerminal,
    length: 1,
    fields: &[FieldDefinition::new("bFocusAuto", 0, 1, Boolean)],
    requests: SWITCH_WITH_DEFAULT,
    optional_requests: NONE,
};

static PRIVACY: ControlDefinition = ControlDefinition {
    id: ControlId::Privacy,
    description: "Privacy shutter: open (0) or closed (1). Reported as an AutoUpdate control.",
    selector: 0x11,
    unit: CameraTerminal,
    length: 1,
    fields: &[
        FieldDefinition::new("bPrivacy", 0, 1, Boolean)
            .with_symbols(SHUTTER),
    ],
    requests: STATUS,
    optional_requests: WRITABLE,
};

static BACKLIGHT_COMPENSATION: ControlDefinition = ControlDefinition {
    id: ControlId::BacklightCompensation,
    description: "Backlight compensation; zero disables it.",
    selector: 0x01,
    unit: ProcessingUnit,
    length: 2,
    fields: &[FieldDefinition::new("wBacklightCompensation", 0, 2, Unsigned)],
    requests: FULL,
    optional_requests: NONE,
};

static BRIGHTNESS: ControlDefinition = ControlDefinition {
    id: ControlId::Brightness,
    description: "Relative brightness. RES is always 1.",
    selector: 0x02,
    unit: ProcessingUnit,
    length: 2,
    fields: &[FieldDefinition::new("wBrightness", 0, 2, Signed)],
    requests: FULL,
    optional_requests: NONE,
};

static CONTRAST: ControlDefinition = ControlDefinition {
    id: ControlId::Contrast,
    description: "Relative contrast. RES is always 1.",
    selector: 0x03,
    unit: ProcessingUnit,
    length: 2,
    fields: &[FieldDefinition::new("wContrast", 0, 2, Unsigned)],
    requests: FULL,
    optional_requests: NONE,
};

static GAIN: ControlDefinition = ControlDefinition {
    id: ControlId::Gain,
    description: "Relative gain. RES is always 1.",
    selector: 0x04,
    unit: ProcessingUnit,
    length: 2,
    fields: &[FieldDefinition::new("wGain", 0, 2, Unsigned)],
    requests: FULL,
    optional_requests: NONE,
};

static POWER_LINE_FREQUENCY: ControlDefinition = ControlDefinition {
    id: ControlId::PowerLineFrequency,
    description: "Local power line frequency for anti-flicker processing.",
    selector: 0x05,
    unit: ProcessingUnit,
    length: 1,
    fields: &[
        FieldDefinition::new("bPowerLineFrequency", 0, 1, Unsigned)
            .with_symbols(POWER_LINE_FREQUENCIES),
    ],
    requests: SWITCH_WITH_DEFAULT,
    optional_requests: NONE,
};

static HUE: ControlDefinition = ControlDefinition {
    id: ControlId::Hue,
    description: "Hue in degrees * 100, within -18000..=18000. Default is zero.",
    selector: 0x06,
    unit: ProcessingUnit,
    length: 2,
    fields: &[FieldDefinition::new("wHue", 0, 2, Signed)],
    requests: READ_RANGE,
    optional_requests: WRITABLE,
};

static SATURATION: ControlDefinition = ControlDefinition {
    id: ControlId::Saturation,
    description: "Relative saturation; zero is grayscale.",
    selector: 0x07,
    unit: ProcessingUnit,
    length: 2,
    fields: &[FieldDefinition::new("wSaturation", 0, 2, Unsigned)],
    requests: FULL,
    optional_requests: NONE,
};

static SHARPNESS: ControlDefinition = ControlDefinition {
    id: ControlId::Sharpness,
    description: "Relative sharpness; MIN means no sharpening.",
    selector: 0x08,
    unit: ProcessingUnit,
    length: 2,
    fields: &[FieldDefinition::new("wSharpness", 0, 2, Unsigned)],
    requests: FULL,
    optional_requests: NONE,
};

static GAMMA: ControlDefinition = ControlDefinition {
    id: ControlId::Gamma,
    description: "Gamma * 100, within 1..=500.",
    selector: 0x09,
    unit: ProcessingUnit,
    length: 2,
    fields: &[FieldDefinition::new("wGamma", 0, 2, Unsigned)],
    requests: FULL,
    optional_requests: NONE,
};

static WHITE_BALANCE_TEMPERATURE: ControlDefinition = ControlDefinition {
    id: ControlId::WhiteBalanceTemperature,
    description: "White balance as a color temperature in kelvin.",
    selector: 0x0A,
    unit: ProcessingUnit,
    length: 2,
    fields: &[FieldDefinition::new("wWhiteBalanceTemperature", 0, 2, Unsigned)],
    requests: READ_RANGE,
    optional_requests: WRITABLE,
};

static AUTO_WHITE_BALANCE_TEMPERATURE: ControlDefinition = ControlDefinition {
    id: ControlId::AutoWhiteBalanceTemperature,
    description: "Automatic white balance temperature.",
    selector: 0x0B,
    unit: ProcessingUnit,
    length: 1,
    fields: &[FieldDefinition::new("bWhiteBalanceTemperatureAuto", 0, 1, Boolean)],
    requests: SWITCH_WITH_DEFAULT,
    optional_requests: NONE,
};

static WHITE_BALANCE_COMPONENT: ControlDefinition = ControlDefinition {
    id: ControlId::WhiteBalanceComponent,
    description: "White balance as blue and red components.",
    selector: 0x0C,
    unit: ProcessingUnit,
    length: 4,
    fields: &[
        FieldDefinition::new("wWhiteBalanceBlue", 0, 2, Unsigned),
        FieldDefinition::new("wWhiteBalanceRed", 2, 2, Unsigned),
    ],
    requests: READ_RANGE,
    optional_requests: WRITABLE,
};

static AUTO_WHITE_BALANCE_COMPONENT: ControlDefinition = ControlDefinition {
    id: ControlId::AutoWhiteBalanceComponent,
    description: "Automatic white balance components.",
    selector: 0x0D,
    unit: ProcessingUnit,
    length: 1,
    fields: &[FieldDefinition::new("bWhiteBalanceComponentAuto", 0, 1, Boolean)],
    requests: SWITCH_WITH_DEFAULT,
    optional_requests: NONE,
};

static DIGITAL_MULTIPLIER: ControlDefinition = ControlDefinition {
    id: ControlId::DigitalMultiplier,
    description: "Digital zoom multiplier step. RES is always 1.",
    selector: 0x0E,
    unit: ProcessingUnit,
    length: 2,
    fields: &[FieldDefinition::new("wMultiplierStep", 0, 2, Unsigned)],
    requests: FULL,
    optional_requests: NONE,
};

static DIGITAL_MULTIPLIER_LIMIT: ControlDefinition = ControlDefinition {
    id: ControlId::DigitalMultiplierLimit,
    description: "Upper bound for the digital zoom multiplier.",
    selector: 0x0F,
    unit: ProcessingUnit,
    length: 2,
    fields: &[FieldDefinition::new("wMultiplierLimit", 0, 2, Unsigned)],
    requests: FULL,
    optional_requests: NONE,
};

static AUTO_HUE: ControlDefinition = ControlDefinition {
    id: ControlId::AutoHue,
    description: "Automatic hue.",
    selector: 0x10,
    unit: ProcessingUnit,
    length: 1,
    fields: &[FieldDefinition::new("bHueAuto", 0, 1, Boolean)],
    requests: SWITCH_WITH_DEFAULT,
    optional_requests: NONE,
};

static ANALOG_VIDEO_STANDARD: ControlDefinition = ControlDefinition {
    id: ControlId::AnalogVideoStandard,
    description: "Video standard of the analog input signal.",
    selector: 0x11,
    unit: ProcessingUnit,
    length: 1,
    fields: &[
        FieldDefinition::new("bVideoStandard", 0, 1, Unsigned)
            .with_symbols(VIDEO_STANDARDS),
    ],
    requests: STATUS,
    optional_requests: NONE,
};

static ANALOG_LOCK_STATUS: ControlDefinition = ControlDefinition {
    id: ControlId::AnalogLockStatus,
    description: "Whether the analog decoder has horizontal lock.",
    selector: 0x12,
    unit: ProcessingUnit,
    length: 1,
    fields: &[
        FieldDefinition::new("bStatus", 0, 1, Unsigned)
            .with_symbols(LOCK_STATES),
    ],
    requests: STATUS,
    optional_requests: NONE,
};
