//! Database schema and migrations for Courrier.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - users table
    r#"
-- Users table for authentication and profiles
CREATE TABLE users (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    nom               TEXT NOT NULL,
    prenom            TEXT NOT NULL,
    email             TEXT NOT NULL UNIQUE,
    mot_de_passe      TEXT NOT NULL,           -- Argon2 hash
    telephone_mobile  TEXT,
    photo_profil      TEXT
);

CREATE INDEX idx_users_email ON users(email);
"#,
    // v2: Messages and their per-recipient reception records
    r#"
-- Messages composed by a sender
CREATE TABLE messages (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    expediteur_id  INTEGER NOT NULL REFERENCES users(id),
    objet          TEXT,
    contenu        TEXT,
    date_envoi     TEXT NOT NULL DEFAULT (datetime('now')),
    statut         TEXT NOT NULL DEFAULT 'CREATED'  -- 'CREATED', 'ENVOYE', 'BROUILLON', 'CORBEILLE'
);

CREATE INDEX idx_messages_expediteur ON messages(expediteur_id);
CREATE INDEX idx_messages_statut ON messages(statut);

-- Folders a recipient can file receptions into
CREATE TABLE folders (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    nom              TEXT NOT NULL,
    proprietaire_id  INTEGER NOT NULL REFERENCES users(id),
    UNIQUE(nom, proprietaire_id)
);

CREATE INDEX idx_folders_proprietaire ON folders(proprietaire_id);

-- One reception per (message, recipient) pair
CREATE TABLE receptions (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    message_id       INTEGER NOT NULL REFERENCES messages(id),
    destinataire_id  INTEGER NOT NULL REFERENCES users(id),
    etat             TEXT NOT NULL DEFAULT 'RECU',  -- 'RECU', 'LU', 'SUPPRIME', 'ARCHIVE', 'CORBEILLE'
    dossier_id       INTEGER REFERENCES folders(id),
    UNIQUE(message_id, destinataire_id)
);

CREATE INDEX idx_receptions_destinataire ON receptions(destinataire_id);
CREATE INDEX idx_receptions_message ON receptions(message_id);
CREATE INDEX idx_receptions_dossier ON receptions(dossier_id);
"#,
    // v3: Contacts and attachments
    r#"
-- Directed owner -> contact relationships between users
CREATE TABLE contacts (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    proprietaire_id  INTEGER NOT NULL REFERENCES users(id),
    contact_id       INTEGER NOT NULL REFERENCES users(id),
    UNIQUE(proprietaire_id, contact_id)
);

CREATE INDEX idx_contacts_proprietaire ON contacts(proprietaire_id);

-- Attachments belonging to a message
CREATE TABLE attachments (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    message_id      INTEGER NOT NULL REFERENCES messages(id),
    nom_fichier     TEXT NOT NULL,
    chemin_fichier  TEXT NOT NULL
);

CREATE INDEX idx_attachments_message ON attachments(message_id);
"#,
];
