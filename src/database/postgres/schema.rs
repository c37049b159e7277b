/// Idempotent table creation, run in order at startup when `install_schema` is set
pub const STATEMENTS: &[&str] = &[
    // fyyur
    r#"CREATE TABLE IF NOT EXISTS venues (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        city TEXT NOT NULL,
        state TEXT NOT NULL,
        address TEXT NOT NULL,
        phone TEXT,
        image_link TEXT,
        facebook_link TEXT,
        website TEXT,
        genres TEXT NOT NULL DEFAULT '',
        seeking_talent BOOLEAN NOT NULL DEFAULT FALSE,
        seeking_description TEXT
    )"#,
    r#"CREATE TABLE IF NOT EXISTS artists (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        city TEXT NOT NULL,
        state TEXT NOT NULL,
        phone TEXT,
        image_link TEXT,
        facebook_link TEXT,
        website TEXT,
        genres TEXT NOT NULL DEFAULT '',
        seeking_venue BOOLEAN NOT NULL DEFAULT FALSE,
        seeking_description TEXT
    )"#,
    r#"CREATE TABLE IF NOT EXISTS shows (
        id SERIAL PRIMARY KEY,
        venue_id INTEGER NOT NULL REFERENCES venues (id) ON DELETE CASCADE,
        artist_id INTEGER NOT NULL REFERENCES artists (id) ON DELETE CASCADE,
        start_time TIMESTAMPTZ NOT NULL
    )"#,
    // trivia
    r#"CREATE TABLE IF NOT EXISTS categories (
        id SERIAL PRIMARY KEY,
        "type" TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS questions (
        id SERIAL PRIMARY KEY,
        question TEXT NOT NULL,
        answer TEXT NOT NULL,
        category INTEGER NOT NULL REFERENCES categories (id),
        difficulty INTEGER NOT NULL
    )"#,
    // casting
    r#"CREATE TABLE IF NOT EXISTS actors (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        age INTEGER NOT NULL,
        gender TEXT NOT NULL DEFAULT 'Other'
    )"#,
    r#"CREATE TABLE IF NOT EXISTS movies (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        release_date DATE NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS performances (
        movie_id INTEGER NOT NULL REFERENCES movies (id) ON DELETE CASCADE,
        actor_id INTEGER NOT NULL REFERENCES actors (id) ON DELETE CASCADE,
        PRIMARY KEY (movie_id, actor_id)
    )"#,
];
