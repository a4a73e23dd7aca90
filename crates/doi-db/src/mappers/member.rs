//! Member and publication entity <-> model mappers

use doi_core::entities::{Member, Publication};

use crate::models::{MemberModel, PublicationModel};

/// Convert MemberModel to Member entity
impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        Member {
            id: model.id,
            sponsor_id: model.sponsor_id,
            name: model.name,
            institution: model.institution,
            contact_email: model.contact_email,
            website_url: model.website_url,
            billing_address: model.billing_address,
            pib: model.pib,
            registration_number: model.registration_number,
            personal_id: model.personal_id,
            activity_code: model.activity_code,
            phone: model.phone,
            contact_person: model.contact_person,
            iban: model.iban,
            bank_name: model.bank_name,
            swift_bic: model.swift_bic,
            vat_registered: model.vat_registered,
            tax_country: model.tax_country,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert PublicationModel to Publication entity
impl From<PublicationModel> for Publication {
    fn from(model: PublicationModel) -> Self {
        Publication {
            id: model.id,
            member_id: model.member_id,
            publication_type: model.publication_type.parse().unwrap_or_default(),
            title: model.title,
            subtitle: model.subtitle,
            language_code: model.language_code,
            journal_abbreviated_title: model.journal_abbreviated_title,
            journal_issn: model.journal_issn,
            journal_electronic_issn: model.journal_electronic_issn,
            journal_coden: model.journal_coden,
            series_title: model.series_title,
            series_issn: model.series_issn,
            series_electronic_issn: model.series_electronic_issn,
            set_title: model.set_title,
            set_isbn: model.set_isbn,
            set_electronic_isbn: model.set_electronic_isbn,
            isbn: model.isbn,
            electronic_isbn: model.electronic_isbn,
            edition_number: model.edition_number,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
