use super::label::{Emotion, NEUTRAL};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One face reported by the detector.
///
/// `emotions` keeps the detector's key order; ties during selection resolve
/// to the label encountered first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceDetection {
    #[serde(rename = "box", default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<[i64; 4]>,
    pub emotions: IndexMap<String, f64>,
}

impl FaceDetection {
    pub fn new<I, S>(emotions: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            bounding_box: None,
            emotions: emotions
                .into_iter()
                .map(|(label, score)| (label.into(), score))
                .collect(),
        }
    }

    pub fn total_score(&self) -> f64 {
        self.emotions.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub emotion: Emotion,
    pub score: f64,
}

/// Result of choosing the dominant emotion from detector output.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    NoFace,
    NoSignificantEmotion,
    Detected {
        top: EmotionScore,
        /// Non-neutral scores of the chosen face, highest first.
        breakdown: Vec<EmotionScore>,
    },
}

/// Picks the face with the largest score sum, drops `neutral`, and returns
/// the highest scoring remaining label.
pub fn select_emotion(faces: &[FaceDetection]) -> Selection {
    let Some(face) = dominant_face(faces) else {
        return Selection::NoFace;
    };

    let candidates: Vec<EmotionScore> = face
        .emotions
        .iter()
        .filter(|(label, _)| label.as_str() != NEUTRAL)
        .map(|(label, score)| EmotionScore {
            emotion: Emotion::from(label.as_str()),
            score: *score,
        })
        .collect();

    let Some(top) = first_max_by(&candidates, |candidate| candidate.score).cloned() else {
        return Selection::NoSignificantEmotion;
    };

    let mut breakdown = candidates;
    // stable sort keeps detector order among equal scores
    breakdown.sort_by(|a, b| b.score.total_cmp(&a.score));

    Selection::Detected { top, breakdown }
}

fn dominant_face(faces: &[FaceDetection]) -> Option<&FaceDetection> {
    first_max_by(faces, FaceDetection::total_score)
}

// `Iterator::max_by` returns the last of equal elements; selection wants the first.
fn first_max_by<T, F>(items: &[T], key: F) -> Option<&T>
where
    F: Fn(&T) -> f64,
{
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let value = key(item);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((item, value)),
        }
    }
    best.map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top_of(selection: &Selection) -> &EmotionScore {
        match selection {
            Selection::Detected { top, .. } => top,
            other => panic!("expected detection, got {other:?}"),
        }
    }

    #[test]
    fn empty_faces_yield_no_face() {
        assert_eq!(select_emotion(&[]), Selection::NoFace);
    }

    #[test]
    fn neutral_only_yields_no_significant_emotion() {
        let faces = vec![FaceDetection::new([("neutral", 0.9)])];
        assert_eq!(select_emotion(&faces), Selection::NoSignificantEmotion);
    }

    #[test]
    fn face_without_scores_yields_no_significant_emotion() {
        let faces = vec![FaceDetection::default()];
        assert_eq!(select_emotion(&faces), Selection::NoSignificantEmotion);
    }

    #[test]
    fn neutral_is_ignored_even_when_highest() {
        let faces = vec![FaceDetection::new([
            ("neutral", 0.8),
            ("sad", 0.15),
            ("happy", 0.05),
        ])];
        let selection = select_emotion(&faces);
        let top = top_of(&selection);
        assert_eq!(top.emotion, Emotion::Sad);
        assert_eq!(top.score, 0.15);
    }

    #[test]
    fn face_with_largest_score_sum_wins() {
        let faces = vec![
            FaceDetection::new([("happy", 0.3), ("neutral", 0.1)]),
            FaceDetection::new([("angry", 0.6), ("fear", 0.3)]),
            FaceDetection::new([("sad", 0.5)]),
        ];
        let selection = select_emotion(&faces);
        assert_eq!(top_of(&selection).emotion, Emotion::Angry);
    }

    #[test]
    fn face_sum_includes_neutral() {
        let faces = vec![
            FaceDetection::new([("happy", 0.2), ("neutral", 0.7)]),
            FaceDetection::new([("fear", 0.6)]),
        ];
        let selection = select_emotion(&faces);
        assert_eq!(top_of(&selection).emotion, Emotion::Happy);
    }

    #[test]
    fn tied_faces_resolve_to_first() {
        let faces = vec![
            FaceDetection::new([("disgust", 0.5), ("sad", 0.5)]),
            FaceDetection::new([("happy", 1.0)]),
        ];
        let selection = select_emotion(&faces);
        assert_eq!(top_of(&selection).emotion, Emotion::Disgust);
    }

    #[test]
    fn tied_labels_resolve_to_first_in_map_order() {
        let faces = vec![FaceDetection::new([
            ("surprise", 0.4),
            ("fear", 0.4),
            ("angry", 0.2),
        ])];
        let selection = select_emotion(&faces);
        assert_eq!(top_of(&selection).emotion, Emotion::Surprise);
    }

    #[test]
    fn breakdown_is_sorted_and_excludes_neutral() {
        let faces = vec![FaceDetection::new([
            ("angry", 0.1),
            ("neutral", 0.3),
            ("happy", 0.5),
            ("sad", 0.1),
        ])];
        match select_emotion(&faces) {
            Selection::Detected { breakdown, .. } => {
                let labels: Vec<_> = breakdown.iter().map(|s| s.emotion.to_string()).collect();
                assert_eq!(labels, vec!["happy", "angry", "sad"]);
            }
            other => panic!("expected detection, got {other:?}"),
        }
    }

    #[test]
    fn unknown_label_can_win() {
        let faces = vec![FaceDetection::new([("contempt", 0.7), ("happy", 0.2)])];
        let selection = select_emotion(&faces);
        assert_eq!(top_of(&selection).emotion, Emotion::Other("contempt".into()));
    }

    #[test]
    fn detector_json_keeps_key_order() {
        let json = r#"[{"box": [10, 20, 64, 64], "emotions": {"fear": 0.3, "angry": 0.3, "neutral": 0.4}}]"#;
        let faces: Vec<FaceDetection> = serde_json::from_str(json).unwrap();
        assert_eq!(faces[0].bounding_box, Some([10, 20, 64, 64]));
        let selection = select_emotion(&faces);
        assert_eq!(top_of(&selection).emotion, Emotion::Fear);
    }
}
