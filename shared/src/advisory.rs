//! Static advisory texts
//!
//! Remedies for every disease label and the six fertilizer advisories.
//! Texts are plain strings; the web layer decides how to format them.

use crate::models::{DiseaseLabel, NutrientImbalance, NutrientLevel};

/// Advice attached to a diagnosis or a nutrient imbalance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advisory {
    pub headline: &'static str,
    pub details: &'static [&'static str],
}

/// Fertilizer advisory for a selected nutrient imbalance
pub fn fertilizer_advice(imbalance: &NutrientImbalance) -> Advisory {
    fertilizer_advice_by_key(imbalance.advice_key())
        .unwrap_or(Advisory {
            headline: "No recommendation available.",
            details: &[],
        })
}

/// Fertilizer advisory by key: `NHigh`, `Nlow`, `PHigh`, `Plow`, `KHigh`, `Klow`
pub fn fertilizer_advice_by_key(key: &str) -> Option<Advisory> {
    let advisory = match key {
        "NHigh" => Advisory {
            headline: "The nitrogen (N) value of your soil is high and might give rise to weeds.",
            details: &[
                "Add manure: well-rotted cattle manure adds organic matter without much nitrogen.",
                "Use coffee grounds or other slightly acidic mulch to tie up surplus nitrogen.",
                "Plant nitrogen-hungry crops such as leafy greens, corn or brassicas in the next rotation.",
                "Mulch with sawdust or wood chips, which lock up nitrogen while they decompose.",
                "Water the field generously to leach excess nitrogen below the root zone.",
                "Avoid nitrogen-fixing cover crops (beans, peas, clover) until the level drops.",
            ],
        },
        "Nlow" => Advisory {
            headline: "The nitrogen (N) value of your soil is low.",
            details: &[
                "Add sawdust-free manure or compost rich in green material.",
                "Apply a nitrogen fertilizer such as urea, ammonium sulphate or calcium ammonium nitrate in split doses.",
                "Grow nitrogen-fixing legumes (beans, peas, soybean, clover) as a cover or rotation crop.",
                "Plant green manure crops such as cabbage or mustard and turn them into the soil.",
                "Use coffee grounds, fish emulsion or blood meal for a quick organic boost.",
                "Mulch with grass clippings that release nitrogen as they break down.",
            ],
        },
        "PHigh" => Advisory {
            headline: "The phosphorus (P) value of your soil is high.",
            details: &[
                "Stop applying manure and phosphate-rich fertilizers until the level falls.",
                "Use only nitrogen and potassium fertilizers, checking the label for a zero middle number.",
                "Grow nitrogen-fixing vegetables, which need less added phosphorus.",
                "Plant crops that draw phosphorus heavily, such as maize or sunflower.",
                "Water thoroughly so soluble phosphorus moves out of the surface layer.",
            ],
        },
        "Plow" => Advisory {
            headline: "The phosphorus (P) value of your soil is low.",
            details: &[
                "Apply bone meal, a fast-acting source of phosphorus.",
                "Use rock phosphate for a slow, long-term supply.",
                "Add a phosphorus fertilizer such as single or double super phosphate.",
                "Work in organic compost to improve phosphorus availability.",
                "Use well-rotted manure with high phosphorus content.",
                "Raise soil pH towards 6.0-7.0 when the soil is acidic, so phosphorus is not fixed.",
            ],
        },
        "KHigh" => Advisory {
            headline: "The potassium (K) value of your soil is high.",
            details: &[
                "Loosen the soil deeply and water it thoroughly to dissolve and wash out surplus potash.",
                "Sift out crushed rock and stones that release potassium over time.",
                "Stop applying potassium-rich fertilizers and wood ash.",
                "Mix in crushed eggshells, seashells or gypsum to add competing calcium.",
                "Grow cover crops such as legumes that fix nitrogen without adding potassium.",
            ],
        },
        "Klow" => Advisory {
            headline: "The potassium (K) value of your soil is low.",
            details: &[
                "Mix muriate of potash or sulphate of potash into the soil.",
                "Apply potash fertilizers in split doses for better uptake.",
                "Bury banana peels or use wood ash sparingly as an organic source.",
                "Use kelp meal or greensand to supply potassium and trace minerals.",
                "Add compost made from crop residues such as straw and vegetable scraps.",
            ],
        },
        _ => return None,
    };
    Some(advisory)
}

/// Short description of a nutrient imbalance for page headings
pub fn imbalance_summary(imbalance: &NutrientImbalance) -> String {
    match imbalance.level {
        NutrientLevel::High => format!(
            "{} is {} above the ideal level",
            imbalance.nutrient,
            imbalance.delta.unsigned_abs()
        ),
        NutrientLevel::Low => format!(
            "{} is {} below the ideal level",
            imbalance.nutrient, imbalance.delta
        ),
    }
}

/// Remedy advisory for a diagnosed label
pub fn disease_remedy(label: DiseaseLabel) -> Advisory {
    use DiseaseLabel::*;

    match label {
        AppleScab => Advisory {
            headline: "Apple scab is caused by the fungus Venturia inaequalis and spreads in cool, wet spring weather.",
            details: &[
                "Rake and destroy fallen leaves in autumn to remove overwintering spores.",
                "Prune the canopy so leaves dry quickly after rain.",
                "Apply a protectant fungicide (captan or sulphur) from green tip until petal fall.",
                "Choose scab-resistant varieties for new plantings.",
            ],
        },
        AppleBlackRot => Advisory {
            headline: "Black rot of apple is caused by the fungus Botryosphaeria obtusa and infects fruit, leaves and bark.",
            details: &[
                "Cut out dead wood, cankers and mummified fruit and burn them.",
                "Remove fire-blight strikes promptly, they are common entry points.",
                "Spray captan or a sulphur product during the growing season.",
            ],
        },
        AppleCedarRust => Advisory {
            headline: "Cedar apple rust needs both apple and juniper (cedar) hosts to complete its life cycle.",
            details: &[
                "Remove galls from nearby junipers, or the junipers themselves where practical.",
                "Apply a fungicide such as myclobutanil from pink bud until a few weeks after bloom.",
                "Plant rust-resistant apple varieties.",
            ],
        },
        CherryPowderyMildew => Advisory {
            headline: "Powdery mildew of cherry is caused by Podosphaera clandestina and thrives in humid, shaded canopies.",
            details: &[
                "Prune to open the canopy and improve air movement.",
                "Avoid excess nitrogen, which produces soft, susceptible growth.",
                "Apply sulphur or potassium bicarbonate at the first sign of white patches.",
            ],
        },
        CornCercosporaLeafSpot => Advisory {
            headline: "Gray leaf spot is caused by Cercospora zeae-maydis and survives in corn residue.",
            details: &[
                "Rotate away from corn for at least one season.",
                "Till under infected residue where erosion allows.",
                "Plant tolerant hybrids and apply a foliar fungicide if lesions reach the ear leaf before tasseling.",
            ],
        },
        CornCommonRust => Advisory {
            headline: "Common rust of corn is caused by Puccinia sorghi; spores blow in each season on the wind.",
            details: &[
                "Grow rust-resistant hybrids.",
                "Plant early so the crop matures before rust pressure peaks.",
                "Use a foliar fungicide on susceptible sweet corn when pustules appear early.",
            ],
        },
        CornNorthernLeafBlight => Advisory {
            headline: "Northern leaf blight is caused by Exserohilum turcicum and favours moderate temperatures with long dew periods.",
            details: &[
                "Use resistant hybrids.",
                "Rotate crops and manage residue to reduce inoculum.",
                "Apply a fungicide around tasseling when disease is present on lower leaves.",
            ],
        },
        GrapeBlackRot => Advisory {
            headline: "Black rot of grape is caused by Guignardia bidwellii and can destroy whole clusters in warm, wet weather.",
            details: &[
                "Remove mummified berries and infected canes during dormant pruning.",
                "Train vines for good air flow and sun exposure.",
                "Apply mancozeb or myclobutanil from early shoot growth through fruit set.",
            ],
        },
        GrapeEsca => Advisory {
            headline: "Esca (black measles) is a trunk disease caused by a complex of wood-decaying fungi.",
            details: &[
                "Prune during dry weather and protect large cuts with a wound sealant.",
                "Remove and destroy severely affected vines and trunk wood.",
                "Delay pruning until late dormancy to reduce infection of fresh wounds.",
            ],
        },
        GrapeLeafBlight => Advisory {
            headline: "Isariopsis leaf spot is caused by Pseudocercospora vitis and causes premature defoliation.",
            details: &[
                "Collect and destroy fallen infected leaves.",
                "Improve canopy ventilation by shoot thinning.",
                "Spray a copper-based fungicide or mancozeb when spots first appear.",
            ],
        },
        OrangeHaunglongbing => Advisory {
            headline: "Huanglongbing (citrus greening) is a bacterial disease spread by the Asian citrus psyllid and has no cure.",
            details: &[
                "Remove and destroy infected trees to protect the rest of the grove.",
                "Control psyllids with systemic insecticides and regular scouting.",
                "Plant only certified disease-free nursery stock.",
                "Maintain tree vigour with balanced nutrition, including micronutrient sprays.",
            ],
        },
        PeachBacterialSpot | PepperBellBacterialSpot | TomatoBacterialSpot => Advisory {
            headline: "Bacterial spot is caused by Xanthomonas bacteria that spread by splashing water and on tools.",
            details: &[
                "Use disease-free seed or transplants and resistant varieties.",
                "Avoid overhead irrigation and working among wet plants.",
                "Apply copper sprays early, alternating with mancozeb to slow resistance.",
                "Rotate away from susceptible crops for two to three years.",
            ],
        },
        PotatoEarlyBlight | TomatoEarlyBlight => Advisory {
            headline: "Early blight is caused by the fungus Alternaria solani; look for target-like rings on older leaves.",
            details: &[
                "Remove infected lower leaves and destroy crop debris after harvest.",
                "Mulch the soil to stop spores splashing onto foliage.",
                "Keep plants well fed; stressed plants are more susceptible.",
                "Apply chlorothalonil or a copper fungicide at the first sign of disease.",
            ],
        },
        PotatoLateBlight | TomatoLateBlight => Advisory {
            headline: "Late blight is caused by the water mould Phytophthora infestans and can destroy a crop within days.",
            details: &[
                "Remove and bag infected plants immediately; do not compost them.",
                "Avoid overhead watering and space plants for air flow.",
                "Apply a protectant fungicide such as mancozeb or chlorothalonil before wet weather.",
                "Plant certified seed potatoes and destroy volunteer plants.",
            ],
        },
        SquashPowderyMildew => Advisory {
            headline: "Powdery mildew of squash appears as white powdery spots and spreads quickly in warm, dry days with humid nights.",
            details: &[
                "Plant resistant varieties in full sun.",
                "Remove heavily infected leaves.",
                "Spray sulphur, neem oil or potassium bicarbonate at first sign.",
            ],
        },
        StrawberryLeafScorch => Advisory {
            headline: "Leaf scorch is caused by the fungus Diplocarpon earlianum and overwinters on infected leaves.",
            details: &[
                "Remove old leaves after harvest and renovate beds regularly.",
                "Avoid overhead irrigation.",
                "Plant resistant cultivars and apply captan when the disease is active.",
            ],
        },
        TomatoLeafMold => Advisory {
            headline: "Leaf mold is caused by Passalora fulva and is most common in humid greenhouses.",
            details: &[
                "Keep relative humidity below 85% with ventilation.",
                "Water at the base of the plant in the morning.",
                "Remove infected leaves and use resistant varieties.",
            ],
        },
        TomatoSeptoriaLeafSpot => Advisory {
            headline: "Septoria leaf spot is caused by Septoria lycopersici; small spots with dark borders appear on lower leaves first.",
            details: &[
                "Remove infected leaves and weeds from the nightshade family.",
                "Mulch and water at soil level.",
                "Rotate crops and apply chlorothalonil or copper fungicide.",
            ],
        },
        TomatoSpiderMites => Advisory {
            headline: "Two-spotted spider mites feed on leaf undersides and multiply fast in hot, dry conditions.",
            details: &[
                "Spray plants with a strong jet of water to knock mites off.",
                "Release predatory mites such as Phytoseiulus persimilis.",
                "Apply insecticidal soap or neem oil, covering leaf undersides.",
            ],
        },
        TomatoTargetSpot => Advisory {
            headline: "Target spot is caused by Corynespora cassiicola and affects leaves, stems and fruit.",
            details: &[
                "Improve air flow by staking and pruning.",
                "Remove crop residue after harvest.",
                "Apply a protectant fungicide during warm, humid periods.",
            ],
        },
        TomatoYellowLeafCurlVirus => Advisory {
            headline: "Tomato yellow leaf curl virus is transmitted by whiteflies; infected plants cannot be cured.",
            details: &[
                "Remove infected plants as soon as symptoms appear.",
                "Control whiteflies with yellow sticky traps, reflective mulch or insecticides.",
                "Use insect netting on seedlings and grow resistant varieties.",
            ],
        },
        TomatoMosaicVirus => Advisory {
            headline: "Tomato mosaic virus spreads mechanically on hands, tools and clothing and survives in plant debris.",
            details: &[
                "Remove and destroy infected plants.",
                "Disinfect tools and wash hands before handling plants.",
                "Use certified virus-free seed and resistant varieties.",
            ],
        },
        AppleHealthy | BlueberryHealthy | CherryHealthy | CornHealthy | GrapeHealthy
        | PeachHealthy | PepperBellHealthy | PotatoHealthy | RaspberryHealthy
        | SoybeanHealthy | StrawberryHealthy | TomatoHealthy => Advisory {
            headline: "The plant looks healthy. No disease was detected.",
            details: &[
                "Keep up regular scouting so problems are caught early.",
                "Water at the base of the plant and avoid wetting the foliage.",
                "Maintain balanced fertilization based on a soil test.",
            ],
        },
    }
}
