//! User-facing error messages
//!
//! Generic, per-locale messages surfaced in the admin state's `error`
//! field. No error codes are exposed.

use crate::domain::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKey {
    LoadFailed,
    UpdateFailed,
    RescheduleFailed,
    /// Booking was moved but the notification could not be delivered
    NotificationFailed,
    RefundFailed,
    DeleteFailed,
    NoteFailed,
}

impl ErrorKey {
    pub fn message(self, locale: Locale) -> &'static str {
        use ErrorKey::*;
        use Locale::*;
        match (self, locale) {
            (LoadFailed, Ka) => "ჯავშნების ჩატვირთვა ვერ მოხერხდა",
            (LoadFailed, En) => "Failed to load bookings",
            (LoadFailed, Ru) => "Не удалось загрузить бронирования",
            (LoadFailed, De) => "Buchungen konnten nicht geladen werden",
            (LoadFailed, Tr) => "Rezervasyonlar yüklenemedi",
            (LoadFailed, Ar) => "فشل تحميل الحجوزات",

            (UpdateFailed, Ka) => "ჯავშნის განახლება ვერ მოხერხდა",
            (UpdateFailed, En) => "Failed to update booking",
            (UpdateFailed, Ru) => "Не удалось обновить бронирование",
            (UpdateFailed, De) => "Buchung konnte nicht aktualisiert werden",
            (UpdateFailed, Tr) => "Rezervasyon güncellenemedi",
            (UpdateFailed, Ar) => "فشل تحديث الحجز",

            (RescheduleFailed, Ka) => "ჯავშნის გადატანა ვერ მოხერხდა",
            (RescheduleFailed, En) => "Failed to reschedule booking",
            (RescheduleFailed, Ru) => "Не удалось перенести бронирование",
            (RescheduleFailed, De) => "Buchung konnte nicht verschoben werden",
            (RescheduleFailed, Tr) => "Rezervasyon yeniden planlanamadı",
            (RescheduleFailed, Ar) => "فشلت إعادة جدولة الحجز",

            (NotificationFailed, Ka) => "ჯავშანი გადატანილია, მაგრამ შეტყობინება ვერ გაიგზავნა",
            (NotificationFailed, En) => "Booking was rescheduled, but notifications could not be sent",
            (NotificationFailed, Ru) => "Бронирование перенесено, но уведомления не отправлены",
            (NotificationFailed, De) => "Buchung wurde verschoben, Benachrichtigungen konnten nicht gesendet werden",
            (NotificationFailed, Tr) => "Rezervasyon taşındı ancak bildirimler gönderilemedi",
            (NotificationFailed, Ar) => "تمت إعادة جدولة الحجز لكن تعذر إرسال الإشعارات",

            (RefundFailed, Ka) => "თანხის დაბრუნება ვერ მოხერხდა",
            (RefundFailed, En) => "Failed to process refund",
            (RefundFailed, Ru) => "Не удалось оформить возврат",
            (RefundFailed, De) => "Rückerstattung fehlgeschlagen",
            (RefundFailed, Tr) => "İade işlemi başarısız oldu",
            (RefundFailed, Ar) => "فشلت عملية الاسترداد",

            (DeleteFailed, Ka) => "ჯავშნის წაშლა ვერ მოხერხდა",
            (DeleteFailed, En) => "Failed to delete booking",
            (DeleteFailed, Ru) => "Не удалось удалить бронирование",
            (DeleteFailed, De) => "Buchung konnte nicht gelöscht werden",
            (DeleteFailed, Tr) => "Rezervasyon silinemedi",
            (DeleteFailed, Ar) => "فشل حذف الحجز",

            (NoteFailed, Ka) => "შენიშვნის შენახვა ვერ მოხერხდა",
            (NoteFailed, En) => "Failed to save note",
            (NoteFailed, Ru) => "Не удалось сохранить заметку",
            (NoteFailed, De) => "Notiz konnte nicht gespeichert werden",
            (NoteFailed, Tr) => "Not kaydedilemedi",
            (NoteFailed, Ar) => "فشل حفظ الملاحظة",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_text_in_every_locale() {
        let keys = [
            ErrorKey::LoadFailed,
            ErrorKey::UpdateFailed,
            ErrorKey::RescheduleFailed,
            ErrorKey::NotificationFailed,
            ErrorKey::RefundFailed,
            ErrorKey::DeleteFailed,
            ErrorKey::NoteFailed,
        ];
        for key in keys {
            for locale in Locale::ALL {
                assert!(!key.message(locale).is_empty());
            }
        }
        assert_eq!(ErrorKey::UpdateFailed.message(Locale::En), "Failed to update booking");
    }
}
