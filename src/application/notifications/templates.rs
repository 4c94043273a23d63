//! Message templates for booking notifications
//!
//! Every notification carries all six locale variants; the recipient's
//! client picks the one matching its UI language.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::domain::{Locale, LocalizedText};

const MONTHS_KA: [&str; 12] = [
    "იანვარი", "თებერვალი", "მარტი", "აპრილი", "მაისი", "ივნისი",
    "ივლისი", "აგვისტო", "სექტემბერი", "ოქტომბერი", "ნოემბერი", "დეკემბერი",
];
const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];
// Genitive forms, as used after a day number
const MONTHS_RU: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня",
    "июля", "августа", "сентября", "октября", "ноября", "декабря",
];
const MONTHS_DE: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni",
    "Juli", "August", "September", "Oktober", "November", "Dezember",
];
const MONTHS_TR: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran",
    "Temmuz", "Ağustos", "Eylül", "Ekim", "Kasım", "Aralık",
];
const MONTHS_AR: [&str; 12] = [
    "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو",
    "يوليو", "أغسطس", "سبتمبر", "أكتوبر", "نوفمبر", "ديسمبر",
];

/// Long date in the locale's own convention
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    let m = date.month0() as usize;
    let d = date.day();
    let y = date.year();
    match locale {
        Locale::Ka => format!("{} {}, {}", d, MONTHS_KA[m], y),
        Locale::En => format!("{} {}, {}", MONTHS_EN[m], d, y),
        Locale::Ru => format!("{} {} {} г.", d, MONTHS_RU[m], y),
        Locale::De => format!("{}. {} {}", d, MONTHS_DE[m], y),
        Locale::Tr => format!("{} {} {}", d, MONTHS_TR[m], y),
        Locale::Ar => format!("{} {} {}", d, MONTHS_AR[m], y),
    }
}

fn reason_label(locale: Locale) -> &'static str {
    match locale {
        Locale::Ka => "მიზეზი",
        Locale::En => "Reason",
        Locale::Ru => "Причина",
        Locale::De => "Grund",
        Locale::Tr => "Sebep",
        Locale::Ar => "السبب",
    }
}

/// Inputs of the "booking moved" message
#[derive(Debug, Clone)]
pub struct RescheduleNotice<'a> {
    pub location: &'a str,
    pub old_date: NaiveDate,
    pub new_date: NaiveDate,
    /// Fallback reason for locales without a translation
    pub reason: Option<&'a str>,
    pub reasons: &'a HashMap<Locale, String>,
}

impl RescheduleNotice<'_> {
    pub fn subject(&self) -> LocalizedText {
        LocalizedText::from_fn(|locale| {
            let text = match locale {
                Locale::Ka => "ჯავშნის თარიღი შეიცვალა",
                Locale::En => "Your booking has been rescheduled",
                Locale::Ru => "Ваше бронирование перенесено",
                Locale::De => "Ihre Buchung wurde verschoben",
                Locale::Tr => "Rezervasyonunuz yeniden planlandı",
                Locale::Ar => "تمت إعادة جدولة حجزك",
            };
            text.to_string()
        })
    }

    pub fn content(&self) -> LocalizedText {
        LocalizedText::from_fn(|locale| {
            let loc = self.location;
            let old = format_date(self.old_date, locale);
            let new = format_date(self.new_date, locale);
            let mut body = match locale {
                Locale::Ka => format!("თქვენი ჯავშანი ({loc}) გადატანილია {old}-დან {new}-ზე."),
                Locale::En => format!("Your booking at {loc} has been moved from {old} to {new}."),
                Locale::Ru => format!("Ваше бронирование ({loc}) перенесено с {old} на {new}."),
                Locale::De => format!("Ihre Buchung in {loc} wurde vom {old} auf den {new} verschoben."),
                Locale::Tr => format!("{loc} rezervasyonunuz {old} tarihinden {new} tarihine taşındı."),
                Locale::Ar => format!("تم نقل حجزك في {loc} من {old} إلى {new}."),
            };
            let reason = self
                .reasons
                .get(&locale)
                .map(|r| r.trim())
                .filter(|r| !r.is_empty())
                .or_else(|| self.reason.map(str::trim).filter(|r| !r.is_empty()));
            if let Some(reason) = reason {
                body.push_str(&format!("\n\n{}: {}", reason_label(locale), reason));
            }
            body
        })
    }
}

/// Inputs of the "booking assigned to you" message
#[derive(Debug, Clone)]
pub struct AssignmentNotice<'a> {
    pub customer_name: &'a str,
    pub location: &'a str,
    pub date: NaiveDate,
}

impl AssignmentNotice<'_> {
    pub fn subject(&self) -> LocalizedText {
        LocalizedText::from_fn(|locale| {
            let text = match locale {
                Locale::Ka => "თქვენ მიგენიჭათ ახალი ჯავშანი",
                Locale::En => "A booking has been assigned to you",
                Locale::Ru => "Вам назначено бронирование",
                Locale::De => "Ihnen wurde eine Buchung zugewiesen",
                Locale::Tr => "Size bir rezervasyon atandı",
                Locale::Ar => "تم تعيين حجز لك",
            };
            text.to_string()
        })
    }

    pub fn content(&self) -> LocalizedText {
        LocalizedText::from_fn(|locale| {
            let who = self.customer_name;
            let loc = self.location;
            let date = format_date(self.date, locale);
            match locale {
                Locale::Ka => format!("ჯავშანი: {who}, {loc}, {date}."),
                Locale::En => format!("Booking for {who} at {loc} on {date}."),
                Locale::Ru => format!("Бронирование: {who}, {loc}, {date}."),
                Locale::De => format!("Buchung für {who} in {loc} am {date}."),
                Locale::Tr => format!("{who} için {loc} rezervasyonu, {date}."),
                Locale::Ar => format!("حجز لـ {who} في {loc} بتاريخ {date}."),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn dates_follow_locale_conventions() {
        let d = date(2025, 3, 5);
        assert_eq!(format_date(d, Locale::En), "March 5, 2025");
        assert_eq!(format_date(d, Locale::De), "5. März 2025");
        assert_eq!(format_date(d, Locale::Ru), "5 марта 2025 г.");
        assert_eq!(format_date(d, Locale::Tr), "5 Mart 2025");
        assert_eq!(format_date(d, Locale::Ka), "5 მარტი, 2025");
    }

    #[test]
    fn reschedule_body_interpolates_location_and_dates() {
        let reasons = HashMap::new();
        let notice = RescheduleNotice {
            location: "Gudauri",
            old_date: date(2025, 6, 10),
            new_date: date(2025, 6, 12),
            reason: None,
            reasons: &reasons,
        };
        let content = notice.content();
        assert_eq!(
            content.en,
            "Your booking at Gudauri has been moved from June 10, 2025 to June 12, 2025."
        );
        assert!(content.ka.contains("Gudauri"));
        assert!(!content.de.contains("Grund"));
    }

    #[test]
    fn per_locale_reason_overrides_fallback() {
        let mut reasons = HashMap::new();
        reasons.insert(Locale::De, "Starker Wind".to_string());
        let notice = RescheduleNotice {
            location: "Kazbegi",
            old_date: date(2025, 6, 10),
            new_date: date(2025, 6, 12),
            reason: Some("Strong wind"),
            reasons: &reasons,
        };
        let content = notice.content();
        assert!(content.de.ends_with("Grund: Starker Wind"));
        assert!(content.en.ends_with("Reason: Strong wind"));
        assert!(content.ar.contains("Strong wind"));
    }

    #[test]
    fn blank_locale_reason_falls_back_to_generic() {
        let mut reasons = HashMap::new();
        reasons.insert(Locale::De, "   ".to_string());
        reasons.insert(Locale::Ru, String::new());
        let notice = RescheduleNotice {
            location: "Kazbegi",
            old_date: date(2025, 6, 10),
            new_date: date(2025, 6, 12),
            reason: Some(" Strong wind "),
            reasons: &reasons,
        };
        let content = notice.content();
        assert!(content.de.ends_with("Grund: Strong wind"));
        assert!(content.ru.ends_with("Причина: Strong wind"));

        let silent = RescheduleNotice { reason: None, ..notice };
        assert!(!silent.content().de.contains("Grund"));
    }

    #[test]
    fn assignment_notice_mentions_customer() {
        let notice = AssignmentNotice {
            customer_name: "Ana",
            location: "Mestia",
            date: date(2025, 9, 1),
        };
        assert_eq!(notice.content().en, "Booking for Ana at Mestia on September 1, 2025.");
        assert!(!notice.subject().tr.is_empty());
    }
}
