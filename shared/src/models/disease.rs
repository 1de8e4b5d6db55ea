//! Plant disease labels
//!
//! The label set is closed: the image classifier emits one score per
//! variant, in the order of [`DiseaseLabel::ALL`].

use serde::{Deserialize, Serialize};

/// Number of classes the image classifier predicts
pub const DISEASE_CLASS_COUNT: usize = 38;

/// One of the 38 PlantVillage classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiseaseLabel {
    AppleScab,
    AppleBlackRot,
    AppleCedarRust,
    AppleHealthy,
    BlueberryHealthy,
    CherryPowderyMildew,
    CherryHealthy,
    CornCercosporaLeafSpot,
    CornCommonRust,
    CornNorthernLeafBlight,
    CornHealthy,
    GrapeBlackRot,
    GrapeEsca,
    GrapeLeafBlight,
    GrapeHealthy,
    OrangeHaunglongbing,
    PeachBacterialSpot,
    PeachHealthy,
    PepperBellBacterialSpot,
    PepperBellHealthy,
    PotatoEarlyBlight,
    PotatoLateBlight,
    PotatoHealthy,
    RaspberryHealthy,
    SoybeanHealthy,
    SquashPowderyMildew,
    StrawberryLeafScorch,
    StrawberryHealthy,
    TomatoBacterialSpot,
    TomatoEarlyBlight,
    TomatoLateBlight,
    TomatoLeafMold,
    TomatoSeptoriaLeafSpot,
    TomatoSpiderMites,
    TomatoTargetSpot,
    TomatoYellowLeafCurlVirus,
    TomatoMosaicVirus,
    TomatoHealthy,
}

impl DiseaseLabel {
    /// All labels in classifier output order
    pub const ALL: [DiseaseLabel; DISEASE_CLASS_COUNT] = [
        DiseaseLabel::AppleScab,
        DiseaseLabel::AppleBlackRot,
        DiseaseLabel::AppleCedarRust,
        DiseaseLabel::AppleHealthy,
        DiseaseLabel::BlueberryHealthy,
        DiseaseLabel::CherryPowderyMildew,
        DiseaseLabel::CherryHealthy,
        DiseaseLabel::CornCercosporaLeafSpot,
        DiseaseLabel::CornCommonRust,
        DiseaseLabel::CornNorthernLeafBlight,
        DiseaseLabel::CornHealthy,
        DiseaseLabel::GrapeBlackRot,
        DiseaseLabel::GrapeEsca,
        DiseaseLabel::GrapeLeafBlight,
        DiseaseLabel::GrapeHealthy,
        DiseaseLabel::OrangeHaunglongbing,
        DiseaseLabel::PeachBacterialSpot,
        DiseaseLabel::PeachHealthy,
        DiseaseLabel::PepperBellBacterialSpot,
        DiseaseLabel::PepperBellHealthy,
        DiseaseLabel::PotatoEarlyBlight,
        DiseaseLabel::PotatoLateBlight,
        DiseaseLabel::PotatoHealthy,
        DiseaseLabel::RaspberryHealthy,
        DiseaseLabel::SoybeanHealthy,
        DiseaseLabel::SquashPowderyMildew,
        DiseaseLabel::StrawberryLeafScorch,
        DiseaseLabel::StrawberryHealthy,
        DiseaseLabel::TomatoBacterialSpot,
        DiseaseLabel::TomatoEarlyBlight,
        DiseaseLabel::TomatoLateBlight,
        DiseaseLabel::TomatoLeafMold,
        DiseaseLabel::TomatoSeptoriaLeafSpot,
        DiseaseLabel::TomatoSpiderMites,
        DiseaseLabel::TomatoTargetSpot,
        DiseaseLabel::TomatoYellowLeafCurlVirus,
        DiseaseLabel::TomatoMosaicVirus,
        DiseaseLabel::TomatoHealthy,
    ];

    /// Label for a classifier output index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position in classifier output order
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// PlantVillage class identifier, e.g. `Tomato___Late_blight`
    pub fn as_str(&self) -> &'static str {
        match self {
            DiseaseLabel::AppleScab => "Apple___Apple_scab",
            DiseaseLabel::AppleBlackRot => "Apple___Black_rot",
            DiseaseLabel::AppleCedarRust => "Apple___Cedar_apple_rust",
            DiseaseLabel::AppleHealthy => "Apple___healthy",
            DiseaseLabel::BlueberryHealthy => "Blueberry___healthy",
            DiseaseLabel::CherryPowderyMildew => "Cherry_(including_sour)___Powdery_mildew",
            DiseaseLabel::CherryHealthy => "Cherry_(including_sour)___healthy",
            DiseaseLabel::CornCercosporaLeafSpot => {
                "Corn_(maize)___Cercospora_leaf_spot Gray_leaf_spot"
            }
            DiseaseLabel::CornCommonRust => "Corn_(maize)___Common_rust_",
            DiseaseLabel::CornNorthernLeafBlight => "Corn_(maize)___Northern_Leaf_Blight",
            DiseaseLabel::CornHealthy => "Corn_(maize)___healthy",
            DiseaseLabel::GrapeBlackRot => "Grape___Black_rot",
            DiseaseLabel::GrapeEsca => "Grape___Esca_(Black_Measles)",
            DiseaseLabel::GrapeLeafBlight => "Grape___Leaf_blight_(Isariopsis_Leaf_Spot)",
            DiseaseLabel::GrapeHealthy => "Grape___healthy",
            DiseaseLabel::OrangeHaunglongbing => "Orange___Haunglongbing_(Citrus_greening)",
            DiseaseLabel::PeachBacterialSpot => "Peach___Bacterial_spot",
            DiseaseLabel::PeachHealthy => "Peach___healthy",
            DiseaseLabel::PepperBellBacterialSpot => "Pepper,_bell___Bacterial_spot",
            DiseaseLabel::PepperBellHealthy => "Pepper,_bell___healthy",
            DiseaseLabel::PotatoEarlyBlight => "Potato___Early_blight",
            DiseaseLabel::PotatoLateBlight => "Potato___Late_blight",
            DiseaseLabel::PotatoHealthy => "Potato___healthy",
            DiseaseLabel::RaspberryHealthy => "Raspberry___healthy",
            DiseaseLabel::SoybeanHealthy => "Soybean___healthy",
            DiseaseLabel::SquashPowderyMildew => "Squash___Powdery_mildew",
            DiseaseLabel::StrawberryLeafScorch => "Strawberry___Leaf_scorch",
            DiseaseLabel::StrawberryHealthy => "Strawberry___healthy",
            DiseaseLabel::TomatoBacterialSpot => "Tomato___Bacterial_spot",
            DiseaseLabel::TomatoEarlyBlight => "Tomato___Early_blight",
            DiseaseLabel::TomatoLateBlight => "Tomato___Late_blight",
            DiseaseLabel::TomatoLeafMold => "Tomato___Leaf_Mold",
            DiseaseLabel::TomatoSeptoriaLeafSpot => "Tomato___Septoria_leaf_spot",
            DiseaseLabel::TomatoSpiderMites => "Tomato___Spider_mites Two-spotted_spider_mite",
            DiseaseLabel::TomatoTargetSpot => "Tomato___Target_Spot",
            DiseaseLabel::TomatoYellowLeafCurlVirus => "Tomato___Tomato_Yellow_Leaf_Curl_Virus",
            DiseaseLabel::TomatoMosaicVirus => "Tomato___Tomato_mosaic_virus",
            DiseaseLabel::TomatoHealthy => "Tomato___healthy",
        }
    }

    /// Crop part of the identifier, human readable
    pub fn crop(&self) -> &'static str {
        match self {
            DiseaseLabel::AppleScab
            | DiseaseLabel::AppleBlackRot
            | DiseaseLabel::AppleCedarRust
            | DiseaseLabel::AppleHealthy => "Apple",
            DiseaseLabel::BlueberryHealthy => "Blueberry",
            DiseaseLabel::CherryPowderyMildew | DiseaseLabel::CherryHealthy => "Cherry",
            DiseaseLabel::CornCercosporaLeafSpot
            | DiseaseLabel::CornCommonRust
            | DiseaseLabel::CornNorthernLeafBlight
            | DiseaseLabel::CornHealthy => "Corn",
            DiseaseLabel::GrapeBlackRot
            | DiseaseLabel::GrapeEsca
            | DiseaseLabel::GrapeLeafBlight
            | DiseaseLabel::GrapeHealthy => "Grape",
            DiseaseLabel::OrangeHaunglongbing => "Orange",
            DiseaseLabel::PeachBacterialSpot | DiseaseLabel::PeachHealthy => "Peach",
            DiseaseLabel::PepperBellBacterialSpot | DiseaseLabel::PepperBellHealthy => {
                "Bell pepper"
            }
            DiseaseLabel::PotatoEarlyBlight
            | DiseaseLabel::PotatoLateBlight
            | DiseaseLabel::PotatoHealthy => "Potato",
            DiseaseLabel::RaspberryHealthy => "Raspberry",
            DiseaseLabel::SoybeanHealthy => "Soybean",
            DiseaseLabel::SquashPowderyMildew => "Squash",
            DiseaseLabel::StrawberryLeafScorch | DiseaseLabel::StrawberryHealthy => "Strawberry",
            DiseaseLabel::TomatoBacterialSpot
            | DiseaseLabel::TomatoEarlyBlight
            | DiseaseLabel::TomatoLateBlight
            | DiseaseLabel::TomatoLeafMold
            | DiseaseLabel::TomatoSeptoriaLeafSpot
            | DiseaseLabel::TomatoSpiderMites
            | DiseaseLabel::TomatoTargetSpot
            | DiseaseLabel::TomatoYellowLeafCurlVirus
            | DiseaseLabel::TomatoMosaicVirus
            | DiseaseLabel::TomatoHealthy => "Tomato",
        }
    }

    /// Condition part of the identifier, human readable
    pub fn condition(&self) -> &'static str {
        match self {
            DiseaseLabel::AppleScab => "Apple scab",
            DiseaseLabel::AppleBlackRot | DiseaseLabel::GrapeBlackRot => "Black rot",
            DiseaseLabel::AppleCedarRust => "Cedar apple rust",
            DiseaseLabel::CherryPowderyMildew | DiseaseLabel::SquashPowderyMildew => {
                "Powdery mildew"
            }
            DiseaseLabel::CornCercosporaLeafSpot => "Cercospora leaf spot (gray leaf spot)",
            DiseaseLabel::CornCommonRust => "Common rust",
            DiseaseLabel::CornNorthernLeafBlight => "Northern leaf blight",
            DiseaseLabel::GrapeEsca => "Esca (black measles)",
            DiseaseLabel::GrapeLeafBlight => "Leaf blight (Isariopsis leaf spot)",
            DiseaseLabel::OrangeHaunglongbing => "Huanglongbing (citrus greening)",
            DiseaseLabel::PeachBacterialSpot
            | DiseaseLabel::PepperBellBacterialSpot
            | DiseaseLabel::TomatoBacterialSpot => "Bacterial spot",
            DiseaseLabel::PotatoEarlyBlight | DiseaseLabel::TomatoEarlyBlight => "Early blight",
            DiseaseLabel::PotatoLateBlight | DiseaseLabel::TomatoLateBlight => "Late blight",
            DiseaseLabel::StrawberryLeafScorch => "Leaf scorch",
            DiseaseLabel::TomatoLeafMold => "Leaf mold",
            DiseaseLabel::TomatoSeptoriaLeafSpot => "Septoria leaf spot",
            DiseaseLabel::TomatoSpiderMites => "Two-spotted spider mite",
            DiseaseLabel::TomatoTargetSpot => "Target spot",
            DiseaseLabel::TomatoYellowLeafCurlVirus => "Tomato yellow leaf curl virus",
            DiseaseLabel::TomatoMosaicVirus => "Tomato mosaic virus",
            DiseaseLabel::AppleHealthy
            | DiseaseLabel::BlueberryHealthy
            | DiseaseLabel::CherryHealthy
            | DiseaseLabel::CornHealthy
            | DiseaseLabel::GrapeHealthy
            | DiseaseLabel::PeachHealthy
            | DiseaseLabel::PepperBellHealthy
            | DiseaseLabel::PotatoHealthy
            | DiseaseLabel::RaspberryHealthy
            | DiseaseLabel::SoybeanHealthy
            | DiseaseLabel::StrawberryHealthy
            | DiseaseLabel::TomatoHealthy => "Healthy",
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.as_str().ends_with("___healthy")
    }
}

impl std::fmt::Display for DiseaseLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.crop(), self.condition())
    }
}

/// Error for identifiers outside the closed label set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown disease label `{0}`")]
pub struct UnknownDiseaseLabel(pub String);

impl std::str::FromStr for DiseaseLabel {
    type Err = UnknownDiseaseLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| UnknownDiseaseLabel(s.to_string()))
    }
}
