use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::Path,
    sync::{Mutex, MutexGuard, PoisonError},
};

use tracing::{debug, info};

use crate::dao::{
    models::{League, Player},
    storage::{StorageError, StorageResult},
    tape::{Tape, Truncate, WriteError},
};

use super::{PlayerStore, validate_new_player};

/// Document written to an empty backing file.
const EMPTY_LEAGUE: &[u8] = b"[]";

/// Player store backed by a single JSON document.
///
/// The league is read once at construction and kept in memory; every mutation
/// rewrites the whole document through a [`Tape`].
pub struct FileSystemPlayerStore<F = File> {
    source_name: String,
    state: Mutex<FileState<F>>,
}

struct FileState<F> {
    tape: Tape<F>,
    league: League,
}

impl<F> FileState<F>
where
    F: Write + Seek + Truncate,
{
    fn persist(&mut self) -> StorageResult<()> {
        let bytes = serde_json::to_vec(&self.league).map_err(WriteError::Encode)?;
        let written = self.tape.write_document(&bytes)?;
        debug!(bytes = written, players = self.league.len(), "league persisted");
        Ok(())
    }
}

impl FileSystemPlayerStore<File> {
    /// Open (creating if needed) the file at `path` and load its league.
    pub fn from_path(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| StorageError::initialization(source_name.clone(), source))?;

        Self::new(file, source_name)
    }
}

impl<F> FileSystemPlayerStore<F>
where
    F: Read + Write + Seek + Truncate + Send,
{
    /// Build a store over an already-open handle.
    ///
    /// An empty handle is seeded with `[]`. `source_name` identifies the
    /// handle in errors and logs.
    pub fn new(mut file: F, source_name: impl Into<String>) -> StorageResult<Self> {
        let source_name = source_name.into();

        initialise(&mut file, &source_name)?;
        let league: League = serde_json::from_reader(&mut file)
            .map_err(|err| StorageError::from_decode(source_name.clone(), err))?;

        info!(source = %source_name, players = league.len(), "player store loaded");

        Ok(Self {
            source_name,
            state: Mutex::new(FileState {
                tape: Tape::new(file),
                league,
            }),
        })
    }

    /// Identity of the backing document.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    fn lock(&self) -> MutexGuard<'_, FileState<F>> {
        // The league stays structurally valid even if a holder panicked.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Seed an empty handle with an empty league and rewind it.
fn initialise<F>(file: &mut F, source_name: &str) -> StorageResult<()>
where
    F: Write + Seek,
{
    let init = |file: &mut F| -> std::io::Result<()> {
        let len = file.seek(SeekFrom::End(0))?;
        if len == 0 {
            file.seek(SeekFrom::Start(0))?;
            file.write_all(EMPTY_LEAGUE)?;
            file.flush()?;
        }
        file.seek(SeekFrom::Start(0))?;
        Ok(())
    };

    init(file).map_err(|source| StorageError::initialization(source_name, source))
}

impl<F> PlayerStore for FileSystemPlayerStore<F>
where
    F: Read + Write + Seek + Truncate + Send,
{
    fn get_league(&self) -> League {
        self.lock().league.sorted_by_wins_descending()
    }

    fn get_player_score(&self, id: i64) -> u32 {
        self.lock().league.find(id).map_or(0, |player| player.wins)
    }

    fn record_win(&self, id: i64) -> StorageResult<u32> {
        let mut state = self.lock();
        let Some(player) = state.league.find_mut(id) else {
            return Err(StorageError::PlayerNotFound { id });
        };
        player.wins = player.wins.saturating_add(1);
        let wins = player.wins;

        state.persist()?;
        debug!(id, wins, "win recorded");
        Ok(wins)
    }

    fn add_player(&self, player: Player) -> StorageResult<()> {
        let mut state = self.lock();
        validate_new_player(&state.league, &player)?;

        let id = player.id;
        state.league.push(player);
        state.persist()?;
        info!(id, "player added");
        Ok(())
    }

    fn delete_player(&self, id: i64) -> StorageResult<()> {
        let mut state = self.lock();
        if state.league.remove(id).is_none() {
            return Err(StorageError::PlayerNotFound { id });
        }

        state.persist()?;
        info!(id, "player deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        io::{self, Cursor},
        sync::Arc,
        thread,
    };

    use proptest::prelude::*;
    use tempfile::NamedTempFile;

    use super::*;

    const SEED: &str = r#"[
        {"id": 2, "name": "Cleo", "wins": 10},
        {"id": 1, "name": "Chris", "wins": 33}]"#;

    fn create_temp_file(initial: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(initial.as_bytes()).unwrap();
        tmp
    }

    fn open(tmp: &NamedTempFile) -> FileSystemPlayerStore {
        FileSystemPlayerStore::from_path(tmp.path()).unwrap()
    }

    #[test]
    fn league_is_sorted_by_wins() {
        let tmp = create_temp_file(SEED);
        let store = open(&tmp);

        let want = League::from(vec![Player::new(1, "Chris", 33), Player::new(2, "Cleo", 10)]);
        assert_eq!(store.get_league(), want);
        // Asking twice must not depend on a previous sort.
        assert_eq!(store.get_league(), want);
    }

    #[test]
    fn sorting_does_not_rewrite_the_document() {
        let tmp = create_temp_file(SEED);
        let store = open(&tmp);

        store.get_league();
        assert_eq!(fs::read_to_string(tmp.path()).unwrap(), SEED);
    }

    #[test]
    fn get_player_score() {
        let tmp = create_temp_file(SEED);
        let store = open(&tmp);

        assert_eq!(store.get_player_score(1), 33);
        assert_eq!(store.get_player_score(2), 10);
        assert_eq!(store.get_player_score(99), 0);
    }

    #[test]
    fn record_win_increments_only_that_player() {
        let tmp = create_temp_file(SEED);
        let store = open(&tmp);

        assert_eq!(store.record_win(1).unwrap(), 34);

        assert_eq!(store.get_player_score(1), 34);
        assert_eq!(store.get_player_score(2), 10);
    }

    #[test]
    fn record_win_for_unknown_player_leaves_file_untouched() {
        let tmp = create_temp_file(SEED);
        let store = open(&tmp);
        let before = fs::read(tmp.path()).unwrap();

        let err = store.record_win(99).unwrap_err();

        assert!(matches!(err, StorageError::PlayerNotFound { id: 99 }));
        assert_eq!(fs::read(tmp.path()).unwrap(), before);
    }

    #[test]
    fn works_with_an_empty_file() {
        let tmp = create_temp_file("");
        let store = open(&tmp);

        assert!(store.get_league().is_empty());
        assert_eq!(fs::read_to_string(tmp.path()).unwrap(), "[]");
    }

    #[test]
    fn creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.db.json");

        let store = FileSystemPlayerStore::from_path(&path).unwrap();

        assert!(store.get_league().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert_eq!(store.source_name(), path.display().to_string());
    }

    #[test]
    fn capitalized_field_names_are_malformed() {
        let tmp = create_temp_file(r#"[{"ID": 1, "Name": "Cleo", "Wins": 10}]"#);

        match FileSystemPlayerStore::from_path(tmp.path()) {
            Err(StorageError::MalformedStore { source_name, .. }) => {
                assert_eq!(source_name, tmp.path().display().to_string());
            }
            Err(other) => panic!("expected malformed store, got {other:?}"),
            Ok(_) => panic!("expected malformed store, got a store"),
        }
    }

    #[test]
    fn garbage_document_is_malformed() {
        let tmp = create_temp_file("not json");
        assert!(matches!(
            FileSystemPlayerStore::from_path(tmp.path()),
            Err(StorageError::MalformedStore { .. })
        ));
    }

    #[test]
    fn unopenable_path_is_an_initialization_failure() {
        let dir = tempfile::tempdir().unwrap();

        match FileSystemPlayerStore::from_path(dir.path()) {
            Err(StorageError::InitializationFailure { source_name, .. }) => {
                assert_eq!(source_name, dir.path().display().to_string());
            }
            Err(other) => panic!("expected initialization failure, got {other:?}"),
            Ok(_) => panic!("expected initialization failure, got a store"),
        }
    }

    /// In-memory handle that refuses to discard its content.
    struct Untruncatable(Cursor<Vec<u8>>);

    impl Read for Untruncatable {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.0.read(buf)
        }
    }

    impl Write for Untruncatable {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            self.0.flush()
        }
    }

    impl Seek for Untruncatable {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.0.seek(pos)
        }
    }

    impl Truncate for Untruncatable {
        fn truncate(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only medium"))
        }
    }

    fn is_truncate_failure<T>(result: StorageResult<T>) -> bool {
        matches!(
            result,
            Err(StorageError::PersistenceFailure(WriteError::Truncate(_)))
        )
    }

    #[test]
    fn failed_rewrites_surface_persistence_failure() {
        let handle = Untruncatable(Cursor::new(SEED.as_bytes().to_vec()));
        let store = FileSystemPlayerStore::new(handle, "read-only").unwrap();

        assert!(is_truncate_failure(store.record_win(1)));
        assert!(is_truncate_failure(store.add_player(Player::new(3, "Tiest", 0))));
        assert!(is_truncate_failure(store.delete_player(2)));

        let bytes = store.lock().tape.get_ref().0.get_ref().clone();
        assert_eq!(bytes, SEED.as_bytes());
    }

    #[test]
    fn added_players_survive_reconstruction() {
        let tmp = create_temp_file("");
        {
            let store = open(&tmp);
            store.add_player(Player::new(1, "Chris", 3)).unwrap();
            store.add_player(Player::new(2, "Cleo", 0)).unwrap();
            store.record_win(2).unwrap();
        }

        let store = open(&tmp);
        assert_eq!(
            store.get_league(),
            League::from(vec![Player::new(1, "Chris", 3), Player::new(2, "Cleo", 1)])
        );
    }

    fn unique_players() -> impl Strategy<Value = Vec<Player>> {
        prop::collection::btree_map(any::<i64>(), ("[A-Za-z][A-Za-z ]{0,15}", 0u32..50), 0..24)
            .prop_map(|players| {
                players
                    .into_iter()
                    .map(|(id, (name, wins))| Player::new(id, name, wins))
                    .collect::<Vec<_>>()
            })
            .prop_shuffle()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Any sequence of unique players reloads as the same set, ordered by wins.
        #[test]
        fn prop_added_players_reload_sorted_by_wins(players in unique_players()) {
            let tmp = NamedTempFile::new().unwrap();
            {
                let store = open(&tmp);
                for player in &players {
                    store.add_player(player.clone()).unwrap();
                }
            }

            let mut want = players;
            want.sort_by(|a, b| b.wins.cmp(&a.wins));

            let reloaded = open(&tmp).get_league();
            prop_assert_eq!(reloaded.as_slice(), want.as_slice());
        }
    }

    #[test]
    fn add_player_rejects_blank_name_without_persisting() {
        let tmp = create_temp_file("[]");
        let store = open(&tmp);

        let err = store.add_player(Player::new(1, "  ", 0)).unwrap_err();

        assert!(matches!(err, StorageError::InvalidPlayer { .. }));
        assert_eq!(fs::read_to_string(tmp.path()).unwrap(), "[]");
    }

    #[test]
    fn add_player_rejects_duplicate_id() {
        let tmp = create_temp_file(SEED);
        let store = open(&tmp);

        let err = store.add_player(Player::new(1, "Imposter", 0)).unwrap_err();

        assert!(matches!(err, StorageError::DuplicatePlayer { id: 1 }));
        assert_eq!(store.get_league().len(), 2);
    }

    #[test]
    fn delete_removes_one_player_and_keeps_order() {
        let tmp = create_temp_file(
            r#"[{"id":1,"name":"A","wins":1},{"id":2,"name":"B","wins":2},{"id":3,"name":"C","wins":3}]"#,
        );
        let store = open(&tmp);

        store.delete_player(2).unwrap();

        let on_disk: League = serde_json::from_str(&fs::read_to_string(tmp.path()).unwrap()).unwrap();
        let ids = on_disk.iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn delete_shrinks_the_document_without_leftovers() {
        let tmp = create_temp_file(SEED);
        let store = open(&tmp);

        store.delete_player(2).unwrap();
        store.delete_player(1).unwrap();

        assert_eq!(fs::read_to_string(tmp.path()).unwrap(), "[]");
    }

    #[test]
    fn delete_unknown_player_fails_and_changes_nothing() {
        let tmp = create_temp_file(SEED);
        let store = open(&tmp);

        let err = store.delete_player(42).unwrap_err();

        assert!(matches!(err, StorageError::PlayerNotFound { id: 42 }));
        assert_eq!(fs::read_to_string(tmp.path()).unwrap(), SEED);
        assert_eq!(store.get_league().len(), 2);
    }

    #[test]
    fn concurrent_wins_are_not_lost() {
        let tmp = create_temp_file(SEED);
        let store = Arc::new(open(&tmp));

        let handles = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..25)
                        .map(|_| store.record_win(2).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();
        let mut totals = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>();
        totals.sort_unstable();

        // Every caller observes its own increment.
        assert_eq!(totals, (11..=210).collect::<Vec<_>>());
        assert_eq!(store.get_player_score(2), 210);
        drop(store);
        assert_eq!(open(&tmp).get_player_score(2), 210);
    }

    #[test]
    fn works_over_an_in_memory_handle() {
        let store = FileSystemPlayerStore::new(Cursor::new(Vec::new()), "memory").unwrap();
        store.add_player(Player::new(7, "Tiest", 14)).unwrap();

        let bytes = store.lock().tape.get_ref().get_ref().clone();
        assert_eq!(bytes, br#"[{"id":7,"name":"Tiest","wins":14}]"#);
    }
}
