//! Integer-coded enumerations of schematic property lists.

use crate::io::altium::PropertyMap;

/// An enumeration stored as an integer property.
pub trait SchEnum: Sized + Copy + Default {
    /// `None` for values outside the known range.
    fn from_i32(value: i32) -> Option<Self>;
    fn to_i32(self) -> i32;
}

/// Read an integer-coded enumeration. Missing keys and out-of-range values
/// give `default`.
pub fn read_enum<T: SchEnum>(props: &PropertyMap, key: &str, default: T) -> T {
    T::from_i32(props.read_int(key, default.to_i32())).unwrap_or(default)
}

// Declares an enum with explicit discriminants and its `SchEnum` impl.
macro_rules! sch_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            #[default]
            $first:ident = $first_value:literal,
            $($variant:ident = $value:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            $first = $first_value,
            $($variant = $value),*
        }

        impl SchEnum for $name {
            fn from_i32(value: i32) -> Option<Self> {
                match value {
                    $first_value => Some(Self::$first),
                    $($value => Some(Self::$variant),)*
                    _ => None,
                }
            }

            fn to_i32(self) -> i32 {
                self as i32
            }
        }
    };
}

sch_enum! {
    /// Value of the `RECORD` key.
    pub enum RecordId {
        #[default]
        Header = 0,
        Component = 1,
        Pin = 2,
        IeeeSymbol = 3,
        Label = 4,
        Bezier = 5,
        Polyline = 6,
        Polygon = 7,
        Ellipse = 8,
        PieChart = 9,
        RoundRectangle = 10,
        EllipticalArc = 11,
        Arc = 12,
        Line = 13,
        Rectangle = 14,
        SheetSymbol = 15,
        SheetEntry = 16,
        PowerPort = 17,
        Port = 18,
        NoErc = 22,
        NetLabel = 25,
        Bus = 26,
        Wire = 27,
        TextFrame = 28,
        Junction = 29,
        Image = 30,
        Sheet = 31,
        SheetName = 32,
        FileName = 33,
        Designator = 34,
        BusEntry = 37,
        Template = 39,
        Parameter = 41,
        ParameterSet = 43,
        ImplementationList = 44,
        Implementation = 45,
        Note = 209,
    }
}

sch_enum! {
    /// Direction a record points to, in steps of 90 degrees.
    pub enum Orientation {
        #[default]
        Rightwards = 0,
        Upwards = 1,
        Leftwards = 2,
        Downwards = 3,
    }
}

sch_enum! {
    pub enum PinElectrical {
        #[default]
        Input = 0,
        Bidirectional = 1,
        Output = 2,
        OpenCollector = 3,
        Passive = 4,
        Tristate = 5,
        OpenEmitter = 6,
        Power = 7,
    }
}

sch_enum! {
    /// IEEE symbol drawn at a pin.
    pub enum PinSymbol {
        #[default]
        NoSymbol = 0,
        Negated = 1,
        RightLeft = 2,
        Clock = 3,
        LowInput = 4,
        AnalogIn = 5,
        NoLogicConnect = 6,
        DigitalIn = 7,
        PostponeOutput = 8,
        OpenCollector = 9,
        HiZ = 10,
        HighCurrent = 11,
        Pulse = 12,
        Schmitt = 13,
        Delay = 14,
        GroupLine = 15,
        GroupBin = 16,
        LowOutput = 17,
        PiSymbol = 18,
        GreaterEqual = 19,
        LessEqual = 20,
        Sigma = 21,
        OpenCollectorPullUp = 22,
        OpenEmitter = 23,
        OpenEmitterPullUp = 24,
        DigitalSignalIn = 25,
        ShiftLeft = 30,
        OpenOutput = 32,
        InternalPullUp = 33,
        InternalPullDown = 34,
    }
}

sch_enum! {
    pub enum LabelJustification {
        #[default]
        BottomLeft = 0,
        BottomCenter = 1,
        BottomRight = 2,
        CenterLeft = 3,
        CenterCenter = 4,
        CenterRight = 5,
        TopLeft = 6,
        TopCenter = 7,
        TopRight = 8,
    }
}

sch_enum! {
    pub enum TextFrameAlignment {
        #[default]
        Left = 1,
        Center = 2,
        Right = 3,
    }
}

sch_enum! {
    pub enum LineWidth {
        #[default]
        Smallest = 0,
        Small = 1,
        Medium = 2,
        Large = 3,
    }
}

sch_enum! {
    pub enum LineStyle {
        #[default]
        Solid = 0,
        Dashed = 1,
        Dotted = 2,
        DashDotted = 3,
    }
}

sch_enum! {
    /// Arrow or marker at the end of a polyline.
    pub enum LineShape {
        #[default]
        None = 0,
        Arrow = 1,
        SolidArrow = 2,
        Tail = 3,
        SolidTail = 4,
        Circle = 5,
        Square = 6,
    }
}

sch_enum! {
    pub enum PowerPortStyle {
        #[default]
        Circle = 0,
        Arrow = 1,
        Bar = 2,
        Wave = 3,
        PowerGround = 4,
        SignalGround = 5,
        Earth = 6,
        GostArrow = 7,
        GostPowerGround = 8,
        GostEarth = 9,
        GostBar = 10,
    }
}

sch_enum! {
    pub enum PortIoType {
        #[default]
        Unspecified = 0,
        Output = 1,
        Input = 2,
        Bidirectional = 3,
    }
}

sch_enum! {
    pub enum PortStyle {
        #[default]
        NoneHorizontal = 0,
        Left = 1,
        Right = 2,
        LeftRight = 3,
        NoneVertical = 4,
        Top = 5,
        Bottom = 6,
        TopBottom = 7,
    }
}

sch_enum! {
    pub enum SheetEntrySide {
        #[default]
        Left = 0,
        Right = 1,
        Top = 2,
        Bottom = 3,
    }
}

sch_enum! {
    pub enum SheetSize {
        #[default]
        A4 = 0,
        A3 = 1,
        A2 = 2,
        A1 = 3,
        A0 = 4,
        A = 5,
        B = 6,
        C = 7,
        D = 8,
        E = 9,
        Letter = 10,
        Legal = 11,
        Tabloid = 12,
        OrcadA = 13,
        OrcadB = 14,
        OrcadC = 15,
        OrcadD = 16,
        OrcadE = 17,
    }
}

sch_enum! {
    pub enum SheetOrientation {
        #[default]
        Landscape = 0,
        Portrait = 1,
    }
}
