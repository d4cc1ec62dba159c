use crate::emotion::Emotion;

/// Encouragement shown alongside the detected mood; empty for unknown labels.
pub fn mood_message(emotion: &Emotion) -> &'static str {
    match emotion {
        Emotion::Happy => "You're feeling great! Enjoy this upbeat music 🎵",
        Emotion::Sad => "Playing music to heal your sad mood 💙",
        Emotion::Angry => "Release your anger with some punchy tunes! 🔥",
        Emotion::Surprise => "Surprise! Let's energize your day with music 🎉",
        Emotion::Fear => "Don't worry, we will overcome your fear together 🌌",
        Emotion::Disgust => "Calm your senses with mellow tunes 🌿",
        Emotion::Other(_) => "",
    }
}

/// Playlist matched to each mood.
pub fn music_url(emotion: &Emotion) -> Option<&'static str> {
    match emotion {
        Emotion::Happy => Some(
            "https://www.youtube.com/watch?v=6LjLdctwN7k&list=PLkfB18MbHxMTFqEnsVXjzLJOD7gl7E265",
        ),
        Emotion::Sad => Some(
            "https://www.youtube.com/watch?v=AKUk1v3rBvc&list=PLkfB18MbHxMQgz5uDNRTO79c0-3GKINS8",
        ),
        Emotion::Angry => Some(
            "https://www.youtube.com/watch?v=jFGKJBPFdUA&list=PLxNm0dqHxmlupV3dr7uq4Rl8L5nwlGKQA",
        ),
        Emotion::Surprise => Some("https://youtu.be/uVM5G2rfy14?si=q9FuH_R-NcIvt9sP"),
        Emotion::Fear => Some("https://youtu.be/8afBXZawfQw?si=vwYfF7cBelS0thtL"),
        Emotion::Disgust => Some(
            "https://www.youtube.com/watch?v=RWts_-gDZDY&list=PLkfB18MbHxMQ5nu-u_85_O0sYXuRYqE9p",
        ),
        Emotion::Other(_) => None,
    }
}

/// CSS class used by the page to theme the mood banner.
pub fn style_class(emotion: &Emotion) -> String {
    if emotion.is_known() {
        format!("mood-{}", emotion.as_str())
    } else {
        "mood-unknown".to_string()
    }
}
