use ratatui::style::Color;

/// Session codes published by the sheet, with their fixed time-range labels.
pub const SESSIONS: [SessionSlot; 4] = [
    SessionSlot {
        code: "1",
        time_range: "08.30 - 10.30",
    },
    SessionSlot {
        code: "2",
        time_range: "10.45 - 12.30",
    },
    SessionSlot {
        code: "3",
        time_range: "14.00 - 16.30",
    },
    SessionSlot {
        code: "4",
        time_range: "16.30 - 18.00",
    },
];

/// Monday through Saturday; the sheet never schedules Sundays.
pub const DAYS: [&str; 6] = ["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu"];

pub const LAB_COLORS: LabColors = LabColors {
    prk: Color::Rgb(0, 153, 255),
    jarkom: Color::Rgb(0, 176, 80),
    ai: Color::Rgb(153, 0, 255),
    multimedia: Color::Rgb(255, 153, 0),
    default: Color::Gray,
};

pub const URLS: UrlSettings = UrlSettings {
    sheet: "https://docs.google.com/spreadsheets/d/e/2PACX-1vRFAwLD3PgidBYNKVR3gdW2wS_oD0VyYhuLP8IYh34eXEJ8iEA3KVaX_nWxLJVmZsB62cj1P-bisn70/pub?output=csv",
    proxy: "https://api.allorigins.win/raw?url=",
    form: "https://docs.google.com/forms/d/e/1FAIpQLSfkRcjb5wr1Q0rizu_JgQYyYi8495sLwW7QBqywJIXrjNbnUQ/viewform",
};

pub const TIME_SETTINGS: TimeSettings = TimeSettings {
    poll_ms: 200,
    fetch_timeout_secs: 20,
};

pub struct SessionSlot {
    pub code: &'static str,
    pub time_range: &'static str,
}

pub struct LabColors {
    pub prk: Color,
    pub jarkom: Color,
    pub ai: Color,
    pub multimedia: Color,
    pub default: Color,
}

pub struct UrlSettings {
    pub sheet: &'static str,
    pub proxy: &'static str,
    pub form: &'static str,
}

pub struct TimeSettings {
    pub poll_ms: u64,
    pub fetch_timeout_secs: u64,
}
